//! Lifecycle transition endpoint

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::enums::EquipmentState,
    services::transitions::TransitionOutcome,
    transitions::TransitionRequest,
};

use super::ApiToken;

/// Transition request body
#[derive(Deserialize, ToSchema)]
pub struct TransitionRequestBody {
    /// Requested lifecycle state
    pub new_state: EquipmentState,
    /// Required when the new state is `assigned`
    pub target_employee_id: Option<i32>,
    pub location_id: Option<i32>,
    /// Mandatory audit reason
    pub reason: String,
    pub notes: Option<String>,
    /// Opaque reference to uploaded evidence media
    pub evidence: Option<String>,
}

/// Request a lifecycle transition for an asset
#[utoipa::path(
    post,
    path = "/equipment/{id}/transitions",
    tag = "transitions",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = TransitionRequestBody,
    responses(
        (status = 201, description = "Transition committed", body = TransitionOutcome),
        (status = 400, description = "Invalid state or missing reason"),
        (status = 404, description = "Equipment or employee not found"),
        (status = 409, description = "Concurrent transition on the same asset; retry"),
        (status = 422, description = "Assignment without a target employee")
    )
)]
pub async fn request_transition(
    State(state): State<crate::AppState>,
    _token: ApiToken,
    Path(id): Path<i32>,
    Json(body): Json<TransitionRequestBody>,
) -> AppResult<(StatusCode, Json<TransitionOutcome>)> {
    let request = TransitionRequest {
        new_state: body.new_state,
        target_employee_id: body.target_employee_id,
        location_id: body.location_id,
        reason: body.reason,
        notes: body.notes,
        evidence: body.evidence,
    };

    let outcome = state.services.transitions.request_transition(id, request).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}
