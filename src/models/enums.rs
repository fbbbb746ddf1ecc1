//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// EquipmentState
// ---------------------------------------------------------------------------

/// Lifecycle state of a piece of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum EquipmentState {
    Operational = 0,
    Assigned = 1,
    InMaintenance = 2,
    InCustody = 3,
    Decommissioned = 4,
}

impl EquipmentState {
    /// States that must carry no active assignment row
    pub const NOT_ASSIGNED: [EquipmentState; 3] = [
        EquipmentState::Operational,
        EquipmentState::InCustody,
        EquipmentState::Decommissioned,
    ];

    pub fn try_from_i16(v: i16) -> Option<Self> {
        match v {
            0 => Some(EquipmentState::Operational),
            1 => Some(EquipmentState::Assigned),
            2 => Some(EquipmentState::InMaintenance),
            3 => Some(EquipmentState::InCustody),
            4 => Some(EquipmentState::Decommissioned),
            _ => None,
        }
    }
}

impl std::fmt::Display for EquipmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EquipmentState::Operational => "operational",
            EquipmentState::Assigned => "assigned",
            EquipmentState::InMaintenance => "in_maintenance",
            EquipmentState::InCustody => "in_custody",
            EquipmentState::Decommissioned => "decommissioned",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// EquipmentKind
// ---------------------------------------------------------------------------

/// Concrete kind of tracked asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum EquipmentKind {
    Computer = 0,
    Device = 1,
}

impl std::fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EquipmentKind::Computer => write!(f, "computer"),
            EquipmentKind::Device => write!(f, "device"),
        }
    }
}

// ---------------------------------------------------------------------------
// ActionType
// ---------------------------------------------------------------------------

/// Kind of ledger event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum ActionType {
    Assignment = 0,
    Return = 1,
    StateChange = 2,
    Creation = 3,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActionType::Assignment => "assignment",
            ActionType::Return => "return",
            ActionType::StateChange => "state_change",
            ActionType::Creation => "creation",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// TargetType
// ---------------------------------------------------------------------------

/// Who a ledger event is directed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[repr(i16)]
pub enum TargetType {
    /// No person involved (maintenance toggle, intake, correction)
    System = 0,
    Employee = 1,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_known_smallints() {
        assert_eq!(EquipmentState::try_from_i16(0), Some(EquipmentState::Operational));
        assert_eq!(EquipmentState::try_from_i16(1), Some(EquipmentState::Assigned));
        assert_eq!(EquipmentState::try_from_i16(2), Some(EquipmentState::InMaintenance));
        assert_eq!(EquipmentState::try_from_i16(3), Some(EquipmentState::InCustody));
        assert_eq!(EquipmentState::try_from_i16(4), Some(EquipmentState::Decommissioned));
    }

    #[test]
    fn test_state_from_unknown_smallint_is_none() {
        assert_eq!(EquipmentState::try_from_i16(5), None);
        assert_eq!(EquipmentState::try_from_i16(-1), None);
    }

    #[test]
    fn test_not_assigned_set_excludes_assigned_and_maintenance() {
        assert!(!EquipmentState::NOT_ASSIGNED.contains(&EquipmentState::Assigned));
        assert!(!EquipmentState::NOT_ASSIGNED.contains(&EquipmentState::InMaintenance));
    }

    #[test]
    fn test_state_serde_labels() {
        let json = serde_json::to_string(&EquipmentState::InMaintenance).unwrap();
        assert_eq!(json, "\"in_maintenance\"");
        let back: EquipmentState = serde_json::from_str("\"assigned\"").unwrap();
        assert_eq!(back, EquipmentState::Assigned);
    }
}
