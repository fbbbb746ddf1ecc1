//! Read-only organizational directory models
//!
//! Employees and locations are owned by the HR directory; this service only
//! resolves assignment targets against them.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Employee record from the directory
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: i32,
    pub firstname: String,
    pub lastname: String,
    pub email: Option<String>,
    pub department: Option<String>,
}

impl Employee {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Location record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub site: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_display_name() {
        let employee = Employee {
            id: 1,
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: None,
            department: None,
        };
        assert_eq!(employee.display_name(), "Ada Lovelace");
    }
}
