//! Manual reconciliation trigger

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    services::reconciler::{ReconcileMode, ReconciliationReport},
};

use super::ApiToken;

/// Reconciliation run request
#[derive(Deserialize, ToSchema)]
pub struct ReconciliationRequest {
    pub mode: ReconcileMode,
    /// Opt-in destructive correction for assigned assets with no history
    #[serde(default)]
    pub allow_downgrade_without_history: bool,
}

/// Run one reconciliation pass over all equipment
#[utoipa::path(
    post,
    path = "/reconciliation",
    tag = "reconciliation",
    security(("bearer_auth" = [])),
    request_body = ReconciliationRequest,
    responses(
        (status = 200, description = "Reconciliation report", body = ReconciliationReport)
    )
)]
pub async fn run_reconciliation(
    State(state): State<crate::AppState>,
    _token: ApiToken,
    Json(request): Json<ReconciliationRequest>,
) -> AppResult<Json<ReconciliationReport>> {
    let report = state
        .services
        .reconciler
        .run(request.mode, request.allow_downgrade_without_history)
        .await?;
    Ok(Json(report))
}
