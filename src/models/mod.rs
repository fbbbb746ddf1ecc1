//! Data models for Inventis

pub mod directory;
pub mod enums;
pub mod equipment;
pub mod ledger;

// Re-export commonly used types
pub use directory::{Employee, Location};
pub use enums::{ActionType, EquipmentKind, EquipmentState, TargetType};
pub use equipment::Equipment;
pub use ledger::{AssignmentEvent, CurrentAssignment};
