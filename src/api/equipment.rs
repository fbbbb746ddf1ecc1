//! Equipment registry endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, UpdateEquipment},
};

use super::ApiToken;

/// List all equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    responses(
        (status = 200, description = "All registered equipment", body = Vec<Equipment>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.list().await?;
    Ok(Json(equipment))
}

/// Get one piece of equipment
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment found", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Register a new asset (intake)
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment registered", body = Equipment),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Serial number already registered")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    _token: ApiToken,
    Json(request): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let equipment = state.services.equipment.create(&request).await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Update descriptive fields of an asset. The lifecycle state is not
/// writable here; use the transitions endpoint.
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    _token: ApiToken,
    Path(id): Path<i32>,
    Json(request): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let equipment = state.services.equipment.update(id, &request).await?;
    Ok(Json(equipment))
}
