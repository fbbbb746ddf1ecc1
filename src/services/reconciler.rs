//! Consistency reconciler
//!
//! Batch detection and repair of drift between `equipment.state` and the
//! ledger's active rows. Every correction goes through the same transition
//! service as live traffic; each asset is its own transaction, and one
//! failed repair never aborts the rest of the batch.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{enums::EquipmentState, ledger::AssignmentEvent},
    repository::Repository,
    transitions::{PlannedAction, TransitionPlan},
};

use super::transitions::TransitionService;

/// Reconciliation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileMode {
    /// Report divergence only
    Check,
    /// Report and repair
    Apply,
}

impl std::str::FromStr for ReconcileMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check" => Ok(ReconcileMode::Check),
            "apply" => Ok(ReconcileMode::Apply),
            other => Err(format!("unknown reconciler mode '{}'", other)),
        }
    }
}

/// One asset whose repair failed; the batch carries on
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssetFailure {
    pub equipment_id: i32,
    pub error: String,
}

/// Outcome of one reconciliation run
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReconciliationReport {
    pub mode: ReconcileMode,
    /// Assets marked assigned with no active ledger row
    pub orphan_assigned_found: Vec<i32>,
    /// Assets in a not-assigned state with a lingering active row
    pub orphan_active_found: Vec<i32>,
    /// Assets in maintenance retaining an active row; never auto-corrected
    pub maintenance_warnings: Vec<i32>,
    pub corrections_applied: u32,
    /// Orphan-assigned assets with no usable history, left for human review
    pub flagged_for_review: Vec<i32>,
    pub failures: Vec<AssetFailure>,
}

/// How to fix one orphan-assigned asset
#[derive(Debug, Clone, PartialEq)]
enum OrphanAssignedFix {
    /// Re-synthesize an active assignment from the last employee in history
    Resynthesize(TransitionPlan),
    /// Destructive guess: drop the asset back to operational (opt-in only)
    Downgrade(TransitionPlan),
    /// No history to repair from; leave for manual review
    Flag,
}

/// Best-effort repair plan for an asset marked assigned with no active row.
/// Pure so the policy is testable without storage.
fn orphan_assigned_fix(
    last_employee_event: Option<&AssignmentEvent>,
    fallback_location: Option<i32>,
    allow_downgrade: bool,
) -> OrphanAssignedFix {
    match last_employee_event {
        Some(event) => OrphanAssignedFix::Resynthesize(TransitionPlan {
            expected_state: EquipmentState::Assigned,
            new_state: None,
            deactivate_active: true,
            action: PlannedAction::Assign,
            target_employee_id: event.target_employee_id,
            location_id: event.location_id.or(fallback_location),
            reason: "reconciliation: restored active assignment from ledger history".to_string(),
            notes: None,
            evidence: None,
        }),
        None if allow_downgrade => OrphanAssignedFix::Downgrade(TransitionPlan {
            expected_state: EquipmentState::Assigned,
            new_state: Some(EquipmentState::Operational),
            deactivate_active: true,
            action: PlannedAction::Release,
            target_employee_id: None,
            location_id: fallback_location,
            reason: "reconciliation: assigned state had no assignment history, downgraded to operational".to_string(),
            notes: None,
            evidence: None,
        }),
        None => OrphanAssignedFix::Flag,
    }
}

/// Repair plan for an asset in a not-assigned state with an active row.
/// The release path turns into a RETURN when the stale row named a person.
fn orphan_active_fix(current_state: EquipmentState) -> TransitionPlan {
    TransitionPlan {
        expected_state: current_state,
        new_state: None,
        deactivate_active: true,
        action: PlannedAction::Release,
        target_employee_id: None,
        location_id: None,
        reason: "reconciliation: cleared stale active assignment".to_string(),
        notes: None,
        evidence: None,
    }
}

#[derive(Clone)]
pub struct ReconcilerService {
    repository: Repository,
    transitions: TransitionService,
}

impl ReconcilerService {
    pub fn new(repository: Repository, transitions: TransitionService) -> Self {
        Self {
            repository,
            transitions,
        }
    }

    /// Run one reconciliation pass. Idempotent: a second apply run over the
    /// same data produces zero corrections.
    pub async fn run(
        &self,
        mode: ReconcileMode,
        allow_downgrade_without_history: bool,
    ) -> AppResult<ReconciliationReport> {
        let mut report = ReconciliationReport {
            mode,
            orphan_assigned_found: Vec::new(),
            orphan_active_found: Vec::new(),
            maintenance_warnings: Vec::new(),
            corrections_applied: 0,
            flagged_for_review: Vec::new(),
            failures: Vec::new(),
        };

        // 1. Assigned with no active row
        let orphan_assigned = self.repository.equipment.find_orphan_assigned().await?;
        for equipment in &orphan_assigned {
            report.orphan_assigned_found.push(equipment.id);

            let last = self
                .repository
                .ledger
                .find_last_event_with_employee(equipment.id)
                .await?;
            let fallback_location = self
                .repository
                .ledger
                .find_latest_location(equipment.id)
                .await?;

            match orphan_assigned_fix(last.as_ref(), fallback_location, allow_downgrade_without_history) {
                OrphanAssignedFix::Resynthesize(plan) => {
                    tracing::warn!(
                        equipment_id = equipment.id,
                        employee = ?plan.target_employee_id,
                        "orphan-assigned: restoring active assignment from history"
                    );
                    self.correct(mode, equipment.id, &plan, &mut report).await;
                }
                OrphanAssignedFix::Downgrade(plan) => {
                    tracing::warn!(
                        equipment_id = equipment.id,
                        "orphan-assigned: no history, downgrading to operational (opt-in)"
                    );
                    self.correct(mode, equipment.id, &plan, &mut report).await;
                }
                OrphanAssignedFix::Flag => {
                    tracing::warn!(
                        equipment_id = equipment.id,
                        "orphan-assigned: no employee history, flagged for manual review"
                    );
                    report.flagged_for_review.push(equipment.id);
                }
            }
        }

        // 2. Not assigned but with an active row
        let orphan_active = self.repository.equipment.find_orphan_active().await?;
        for equipment in &orphan_active {
            report.orphan_active_found.push(equipment.id);
            tracing::warn!(
                equipment_id = equipment.id,
                state = %equipment.state,
                "orphan-active: stale active assignment"
            );
            let plan = orphan_active_fix(equipment.state);
            self.correct(mode, equipment.id, &plan, &mut report).await;
        }

        // 3. Maintenance may legitimately retain a holder; warn only
        report.maintenance_warnings = self
            .repository
            .equipment
            .find_maintenance_with_active()
            .await?;
        for id in &report.maintenance_warnings {
            tracing::warn!(equipment_id = *id, "in maintenance with active assignment");
        }

        tracing::info!(
            mode = ?report.mode,
            orphan_assigned = report.orphan_assigned_found.len(),
            orphan_active = report.orphan_active_found.len(),
            corrections = report.corrections_applied,
            flagged = report.flagged_for_review.len(),
            failures = report.failures.len(),
            "reconciliation finished"
        );
        Ok(report)
    }

    /// Apply one correction in its own transaction; collect failures
    async fn correct(
        &self,
        mode: ReconcileMode,
        equipment_id: i32,
        plan: &TransitionPlan,
        report: &mut ReconciliationReport,
    ) {
        if mode != ReconcileMode::Apply {
            return;
        }
        match self.transitions.apply_plan(equipment_id, plan).await {
            Ok(_) => report.corrections_applied += 1,
            Err(e) => {
                tracing::error!(equipment_id, "reconciliation repair failed: {}", e);
                report.failures.push(AssetFailure {
                    equipment_id,
                    error: e.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{ActionType, TargetType};
    use chrono::Utc;

    fn employee_event(employee_id: i32, location_id: Option<i32>) -> AssignmentEvent {
        AssignmentEvent {
            id: 1,
            equipment_id: 10,
            event_date: Utc::now(),
            action_type: ActionType::Assignment,
            target_type: TargetType::Employee,
            target_employee_id: Some(employee_id),
            active: false,
            location_id,
            reason: "assigned".to_string(),
            notes: None,
            evidence: None,
        }
    }

    #[test]
    fn test_orphan_assigned_with_history_resynthesizes_assignment() {
        let last = employee_event(42, Some(3));
        let fix = orphan_assigned_fix(Some(&last), Some(9), false);
        match fix {
            OrphanAssignedFix::Resynthesize(plan) => {
                assert_eq!(plan.action, PlannedAction::Assign);
                assert_eq!(plan.target_employee_id, Some(42));
                // Event's own location wins over the fallback
                assert_eq!(plan.location_id, Some(3));
                assert_eq!(plan.expected_state, EquipmentState::Assigned);
                assert_eq!(plan.new_state, None, "state stays assigned");
                assert!(plan.deactivate_active);
            }
            other => panic!("expected resynthesize, got {:?}", other),
        }
    }

    #[test]
    fn test_orphan_assigned_uses_fallback_location_when_event_has_none() {
        let last = employee_event(42, None);
        match orphan_assigned_fix(Some(&last), Some(9), false) {
            OrphanAssignedFix::Resynthesize(plan) => assert_eq!(plan.location_id, Some(9)),
            other => panic!("expected resynthesize, got {:?}", other),
        }
    }

    #[test]
    fn test_orphan_assigned_without_history_is_flagged_by_default() {
        assert_eq!(orphan_assigned_fix(None, None, false), OrphanAssignedFix::Flag);
    }

    #[test]
    fn test_orphan_assigned_downgrade_is_opt_in() {
        match orphan_assigned_fix(None, None, true) {
            OrphanAssignedFix::Downgrade(plan) => {
                assert_eq!(plan.new_state, Some(EquipmentState::Operational));
                assert_eq!(plan.action, PlannedAction::Release);
                assert!(plan.deactivate_active);
            }
            other => panic!("expected downgrade, got {:?}", other),
        }
    }

    #[test]
    fn test_orphan_active_fix_releases_without_touching_state() {
        let plan = orphan_active_fix(EquipmentState::Operational);
        assert_eq!(plan.expected_state, EquipmentState::Operational);
        assert_eq!(plan.new_state, None);
        assert_eq!(plan.action, PlannedAction::Release);
        assert!(plan.deactivate_active);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("check".parse::<ReconcileMode>().unwrap(), ReconcileMode::Check);
        assert_eq!("apply".parse::<ReconcileMode>().unwrap(), ReconcileMode::Apply);
        assert!("repair".parse::<ReconcileMode>().is_err());
    }
}
