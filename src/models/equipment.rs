//! Equipment model

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::{EquipmentKind, EquipmentState};

static SERIAL_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/-]{2,63}$").expect("valid regex"));

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Manufacturer serial number (unique)
    pub serial_number: String,
    /// Internal inventory code (unique)
    pub inventory_code: String,
    pub kind: EquipmentKind,
    pub state: EquipmentState,
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub notes: Option<String>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Intake request: registers an asset and appends its CREATION ledger event
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateEquipment {
    #[validate(regex(path = *SERIAL_NUMBER_RE, message = "invalid serial number"))]
    pub serial_number: String,
    #[validate(length(min = 1, max = 64))]
    pub inventory_code: String,
    pub kind: EquipmentKind,
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub notes: Option<String>,
    /// Initial location, recorded on the CREATION event
    pub location_id: Option<i32>,
}

/// Update of descriptive fields only; lifecycle state is never writable here
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, max = 64))]
    pub inventory_code: Option<String>,
    pub model: Option<String>,
    pub vendor: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_price: Option<Decimal>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_number_format() {
        assert!(SERIAL_NUMBER_RE.is_match("C02XK1JGJGH5"));
        assert!(SERIAL_NUMBER_RE.is_match("SN-2024/0042"));
        assert!(!SERIAL_NUMBER_RE.is_match("ab"));
        assert!(!SERIAL_NUMBER_RE.is_match("-leading-dash"));
        assert!(!SERIAL_NUMBER_RE.is_match("has space"));
    }
}
