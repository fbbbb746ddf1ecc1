//! Transition request and plan types

use crate::models::enums::EquipmentState;

/// A caller's request to move an asset to a new lifecycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    pub new_state: EquipmentState,
    pub target_employee_id: Option<i32>,
    pub location_id: Option<i32>,
    /// Mandatory for audit
    pub reason: String,
    pub notes: Option<String>,
    pub evidence: Option<String>,
}

/// What kind of ledger row the plan inserts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedAction {
    /// New active ASSIGNMENT row targeting an employee
    Assign,
    /// RETURN when the deactivated row had a human target, else STATE_CHANGE.
    /// The mutator resolves which, since only it sees the prior active row.
    Release,
    /// Inactive STATE_CHANGE audit row; equipment row untouched
    Note,
}

/// Validated plan for one transition, executed atomically by the mutator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    /// State the plan was computed against; the mutator re-reads under lock
    /// and aborts with ConcurrentModification on mismatch
    pub expected_state: EquipmentState,
    /// New value for the equipment state column; None leaves the row alone
    pub new_state: Option<EquipmentState>,
    /// Whether currently active ledger rows must be deactivated first
    pub deactivate_active: bool,
    pub action: PlannedAction,
    pub target_employee_id: Option<i32>,
    pub location_id: Option<i32>,
    pub reason: String,
    pub notes: Option<String>,
    pub evidence: Option<String>,
}
