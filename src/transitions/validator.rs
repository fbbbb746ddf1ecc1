//! State transition validator
//!
//! Pure business rules: no storage access. Every legality decision for the
//! lifecycle state machine lives here and nowhere else.

use thiserror::Error;

use crate::error::AppError;
use crate::models::enums::EquipmentState;

use super::plan::{PlannedAction, TransitionPlan, TransitionRequest};

/// Rejections produced before any write happens
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("transition to assigned requires a target employee")]
    MissingTarget,
    #[error("a reason is required for every transition")]
    MissingReason,
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::MissingTarget => AppError::MissingTarget(e.to_string()),
            TransitionError::MissingReason => AppError::Validation(e.to_string()),
        }
    }
}

/// Decide whether a transition is legal and what the mutator must do.
///
/// Rules:
/// - entering `Assigned` requires a target employee and produces one new
///   active ASSIGNMENT row, deactivating stale active rows first;
/// - leaving `Assigned` (to any other state) is always legal and must
///   deactivate the active assignment;
/// - a same-state request is an audit note: inactive STATE_CHANGE, the
///   equipment row is not touched — except re-entering `Assigned` with a
///   target, which is a reassignment;
/// - any other state-to-state move is legal and recorded as a release;
///   normally no active row exists there and the deactivation touches
///   zero rows.
pub fn plan_transition(
    current: EquipmentState,
    req: &TransitionRequest,
) -> Result<TransitionPlan, TransitionError> {
    if req.reason.trim().is_empty() {
        return Err(TransitionError::MissingReason);
    }

    let base = |action, new_state, deactivate| TransitionPlan {
        expected_state: current,
        new_state,
        deactivate_active: deactivate,
        action,
        target_employee_id: req.target_employee_id,
        location_id: req.location_id,
        reason: req.reason.clone(),
        notes: req.notes.clone(),
        evidence: req.evidence.clone(),
    };

    if req.new_state == EquipmentState::Assigned {
        if req.target_employee_id.is_none() {
            return Err(TransitionError::MissingTarget);
        }
        // Reassignment while already assigned keeps the state column as is
        // but still supersedes the active row.
        let new_state = (current != EquipmentState::Assigned).then_some(EquipmentState::Assigned);
        return Ok(base(PlannedAction::Assign, new_state, true));
    }

    if req.new_state == current {
        // Reason/location-only update, recorded without touching state or
        // the active assignment.
        return Ok(base(PlannedAction::Note, None, false));
    }

    // Leaving Assigned must drop the active row; other moves normally have
    // no active row and the deactivation affects zero rows.
    Ok(base(PlannedAction::Release, Some(req.new_state), true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::EquipmentState::*;

    fn request(new_state: EquipmentState) -> TransitionRequest {
        TransitionRequest {
            new_state,
            target_employee_id: None,
            location_id: None,
            reason: "unit test".to_string(),
            notes: None,
            evidence: None,
        }
    }

    #[test]
    fn test_assign_requires_target() {
        let err = plan_transition(Operational, &request(Assigned)).unwrap_err();
        assert_eq!(err, TransitionError::MissingTarget);
    }

    #[test]
    fn test_assign_with_target_plans_active_assignment() {
        let mut req = request(Assigned);
        req.target_employee_id = Some(42);
        let plan = plan_transition(Operational, &req).unwrap();
        assert_eq!(plan.action, PlannedAction::Assign);
        assert_eq!(plan.new_state, Some(Assigned));
        assert!(plan.deactivate_active);
        assert_eq!(plan.expected_state, Operational);
        assert_eq!(plan.target_employee_id, Some(42));
    }

    #[test]
    fn test_reassignment_supersedes_without_state_write() {
        let mut req = request(Assigned);
        req.target_employee_id = Some(7);
        let plan = plan_transition(Assigned, &req).unwrap();
        assert_eq!(plan.action, PlannedAction::Assign);
        assert_eq!(plan.new_state, None);
        assert!(plan.deactivate_active);
    }

    #[test]
    fn test_reassignment_without_target_is_rejected() {
        let err = plan_transition(Assigned, &request(Assigned)).unwrap_err();
        assert_eq!(err, TransitionError::MissingTarget);
    }

    #[test]
    fn test_leaving_assigned_is_legal_to_every_state() {
        for target in [Operational, InMaintenance, InCustody, Decommissioned] {
            let plan = plan_transition(Assigned, &request(target)).unwrap();
            assert_eq!(plan.action, PlannedAction::Release);
            assert_eq!(plan.new_state, Some(target));
            assert!(plan.deactivate_active, "leaving assigned must deactivate");
        }
    }

    #[test]
    fn test_moves_between_unassigned_states_deactivate_defensively() {
        let plan = plan_transition(Operational, &request(InMaintenance)).unwrap();
        assert_eq!(plan.action, PlannedAction::Release);
        assert_eq!(plan.new_state, Some(InMaintenance));
        assert!(plan.deactivate_active);
    }

    #[test]
    fn test_same_state_is_an_audit_note() {
        let mut req = request(InMaintenance);
        req.location_id = Some(3);
        let plan = plan_transition(InMaintenance, &req).unwrap();
        assert_eq!(plan.action, PlannedAction::Note);
        assert_eq!(plan.new_state, None);
        assert!(!plan.deactivate_active);
        assert_eq!(plan.location_id, Some(3));
    }

    #[test]
    fn test_empty_reason_is_rejected() {
        let mut req = request(Operational);
        req.reason = "  ".to_string();
        let err = plan_transition(InCustody, &req).unwrap_err();
        assert_eq!(err, TransitionError::MissingReason);
    }

    #[test]
    fn test_plan_carries_expected_state_for_race_detection() {
        let plan = plan_transition(InCustody, &request(Operational)).unwrap();
        assert_eq!(plan.expected_state, InCustody);
    }
}
