//! Transition service: the transactional mutator
//!
//! The only code path in the system that writes `equipment.state` or the
//! ledger's `active` flag. Both sides of the denormalized fact change in one
//! transaction or not at all.

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{ActionType, EquipmentState, TargetType},
        ledger::NewAssignmentEvent,
    },
    repository::Repository,
    transitions::{plan_transition, PlannedAction, TransitionPlan, TransitionRequest},
};

use super::audit::AuditService;

/// Result of a committed transition
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransitionOutcome {
    pub equipment_id: i32,
    pub new_state: EquipmentState,
    pub ledger_event_id: i64,
}

#[derive(Clone)]
pub struct TransitionService {
    repository: Repository,
    audit: AuditService,
}

impl TransitionService {
    pub fn new(repository: Repository, audit: AuditService) -> Self {
        Self { repository, audit }
    }

    /// Validate and execute a lifecycle transition.
    ///
    /// On a detected race the caller gets `ConcurrentModification` and is
    /// expected to re-fetch and resubmit; no automatic retry here.
    pub async fn request_transition(
        &self,
        equipment_id: i32,
        request: TransitionRequest,
    ) -> AppResult<TransitionOutcome> {
        let equipment = self.repository.equipment.get_by_id(equipment_id).await?;
        if let Some(employee_id) = request.target_employee_id {
            // Resolve the target before planning so a bad id fails cleanly
            let employee = self.repository.directory.get_employee(employee_id).await?;
            tracing::debug!(
                employee_id,
                employee = %employee.display_name(),
                "resolved assignment target"
            );
        }

        let plan = plan_transition(equipment.state, &request)?;
        let outcome = self.apply_plan(equipment_id, &plan).await?;

        self.audit.notify_transition(&outcome, &plan.reason);
        Ok(outcome)
    }

    /// Execute a validated plan atomically. Also the entry point for
    /// reconciliation corrections, which must not bypass this path.
    pub(crate) async fn apply_plan(
        &self,
        equipment_id: i32,
        plan: &TransitionPlan,
    ) -> AppResult<TransitionOutcome> {
        let mut tx = self.repository.pool.begin().await?;

        // Re-read under the row lock; a mismatch means a concurrent
        // transition committed since the plan was computed.
        let current = self.repository.equipment.lock_state(&mut tx, equipment_id).await?;
        if current != plan.expected_state {
            return Err(AppError::ConcurrentModification {
                equipment_id,
                message: format!(
                    "expected state {} but found {}",
                    plan.expected_state, current
                ),
            });
        }

        if let Some(new_state) = plan.new_state {
            self.repository
                .equipment
                .set_state_in_tx(&mut tx, equipment_id, new_state)
                .await?;
        }

        let deactivated = if plan.deactivate_active {
            self.repository
                .ledger
                .deactivate_all_active_in_tx(&mut tx, equipment_id)
                .await?
        } else {
            Vec::new()
        };

        let event = match plan.action {
            PlannedAction::Assign => NewAssignmentEvent {
                action_type: ActionType::Assignment,
                target_type: TargetType::Employee,
                target_employee_id: plan.target_employee_id,
                active: true,
                location_id: plan.location_id,
                reason: plan.reason.clone(),
                notes: plan.notes.clone(),
                evidence: plan.evidence.clone(),
            },
            PlannedAction::Release => {
                // A release of a human assignment is a RETURN and keeps the
                // returning employee on the row; everything else is a plain
                // state change.
                let released_employee =
                    deactivated.iter().find_map(|e| e.target_employee_id);
                match released_employee {
                    Some(employee_id) => NewAssignmentEvent {
                        action_type: ActionType::Return,
                        target_type: TargetType::Employee,
                        target_employee_id: Some(employee_id),
                        active: false,
                        location_id: plan.location_id,
                        reason: plan.reason.clone(),
                        notes: plan.notes.clone(),
                        evidence: plan.evidence.clone(),
                    },
                    None => NewAssignmentEvent {
                        action_type: ActionType::StateChange,
                        target_type: TargetType::System,
                        target_employee_id: None,
                        active: false,
                        location_id: plan.location_id,
                        reason: plan.reason.clone(),
                        notes: plan.notes.clone(),
                        evidence: plan.evidence.clone(),
                    },
                }
            }
            PlannedAction::Note => NewAssignmentEvent {
                action_type: ActionType::StateChange,
                target_type: TargetType::System,
                target_employee_id: None,
                active: false,
                location_id: plan.location_id,
                reason: plan.reason.clone(),
                notes: plan.notes.clone(),
                evidence: plan.evidence.clone(),
            },
        };

        let ledger_event_id = self
            .repository
            .ledger
            .append_event_in_tx(&mut tx, equipment_id, &event)
            .await?;

        tx.commit().await?;

        let new_state = plan.new_state.unwrap_or(plan.expected_state);
        tracing::info!(
            equipment_id,
            %new_state,
            ledger_event_id,
            "transition committed"
        );

        Ok(TransitionOutcome {
            equipment_id,
            new_state,
            ledger_event_id,
        })
    }
}
