//! Error types for Inventis server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable application error codes surfaced in every error response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchEquipment = 4,
    NoSuchEmployee = 5,
    BadValue = 6,
    Duplicate = 7,
    MissingTarget = 8,
    InvalidState = 9,
    ConcurrentModification = 10,
    NoSuchData = 11,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Assignment target does not exist in the directory
    #[error("No such employee: {0}")]
    NoSuchEmployee(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    /// Transition to ASSIGNED requested without an employee target
    #[error("Missing assignment target: {0}")]
    MissingTarget(String),

    /// Unknown or nonsensical lifecycle state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A concurrent transition won the race on the same asset; retryable
    #[error("Concurrent modification on equipment {equipment_id}: {message}")]
    ConcurrentModification { equipment_id: i32, message: String },

    #[error("Business rule violation: {0}")]
    BusinessRule(String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
    /// Whether the caller may retry the same request unchanged
    pub retryable: bool,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut retryable = false;
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchEquipment, msg.clone())
            }
            AppError::NoSuchEmployee(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchEmployee, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::Duplicate, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::MissingTarget(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::MissingTarget, msg.clone())
            }
            AppError::InvalidState(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::InvalidState, msg.clone())
            }
            AppError::ConcurrentModification { equipment_id, message } => {
                retryable = true;
                (
                    StatusCode::CONFLICT,
                    ErrorCode::ConcurrentModification,
                    format!("Equipment {}: {}", equipment_id, message),
                )
            }
            AppError::BusinessRule(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorCode::Failure, msg.clone())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
            retryable,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concurrent_modification_maps_to_conflict() {
        let err = AppError::ConcurrentModification {
            equipment_id: 7,
            message: "state changed underneath".to_string(),
        };
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_missing_target_maps_to_unprocessable_entity() {
        let err = AppError::MissingTarget("no employee supplied".to_string());
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_invalid_state_maps_to_bad_request() {
        let err = AppError::InvalidState("unknown state value 42".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_employee_gets_its_own_error_code() {
        let resp = AppError::NoSuchEmployee("Employee 9 not found".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["code"], ErrorCode::NoSuchEmployee as u32);

        let resp = AppError::NotFound("Equipment 9 not found".to_string()).into_response();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("body");
        let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["code"], ErrorCode::NoSuchEquipment as u32);
    }
}
