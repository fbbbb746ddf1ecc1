//! Assignment ledger models and the read-side projection types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::{ActionType, EquipmentState, TargetType};

/// One row of the append-only assignment ledger
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssignmentEvent {
    pub id: i64,
    pub equipment_id: i32,
    pub event_date: DateTime<Utc>,
    pub action_type: ActionType,
    pub target_type: TargetType,
    pub target_employee_id: Option<i32>,
    pub active: bool,
    pub location_id: Option<i32>,
    pub reason: String,
    pub notes: Option<String>,
    /// Opaque reference to externally stored media
    pub evidence: Option<String>,
}

/// Ledger row enriched with display names for history listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssignmentEventDetails {
    pub id: i64,
    pub equipment_id: i32,
    pub event_date: DateTime<Utc>,
    pub action_type: ActionType,
    pub target_type: TargetType,
    pub target_employee_id: Option<i32>,
    pub target_employee_name: Option<String>,
    pub active: bool,
    pub location_id: Option<i32>,
    pub location_name: Option<String>,
    pub reason: String,
    pub notes: Option<String>,
    pub evidence: Option<String>,
}

/// Current-assignment projection for one asset
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrentAssignment {
    pub equipment_id: i32,
    pub state: EquipmentState,
    pub target_employee_id: Option<i32>,
    pub target_employee_name: Option<String>,
    /// Active assignment's location when set, else the most recent ledger
    /// row carrying a location (location persists across ownership changes)
    pub location_id: Option<i32>,
    pub location_name: Option<String>,
}

/// Fields of a ledger row to be inserted by the mutator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssignmentEvent {
    pub action_type: ActionType,
    pub target_type: TargetType,
    pub target_employee_id: Option<i32>,
    pub active: bool,
    pub location_id: Option<i32>,
    pub reason: String,
    pub notes: Option<String>,
    pub evidence: Option<String>,
}
