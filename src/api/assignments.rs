//! Assignment projection endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::ledger::{AssignmentEventDetails, CurrentAssignment},
};

/// Current assignment for an asset
#[utoipa::path(
    get,
    path = "/equipment/{id}/assignment",
    tag = "assignments",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Current state, holder and location", body = CurrentAssignment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_current_assignment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CurrentAssignment>> {
    let assignment = state.services.assignments.get_current_assignment(id).await?;
    Ok(Json(assignment))
}

/// Full assignment history for an asset, newest first
#[utoipa::path(
    get,
    path = "/equipment/{id}/history",
    tag = "assignments",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Ledger events", body = Vec<AssignmentEventDetails>),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_history(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<AssignmentEventDetails>>> {
    let history = state.services.assignments.get_history(id).await?;
    Ok(Json(history))
}
