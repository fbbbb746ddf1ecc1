//! API handlers for Inventis REST endpoints

pub mod assignments;
pub mod directory;
pub mod equipment;
pub mod health;
pub mod openapi;
pub mod reconciliation;
pub mod transitions;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::{error::AppError, AppState};

/// Extractor gating mutating routes behind the configured API token.
/// Authentication proper is owned by the fronting gateway; this is only
/// its interface.
pub struct ApiToken;

#[async_trait]
impl FromRequestParts<AppState> for ApiToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Authentication("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Authentication("Invalid authorization header format".to_string()))?;

        if token != state.config.auth.api_token {
            return Err(AppError::Authentication("Invalid API token".to_string()));
        }

        Ok(ApiToken)
    }
}
