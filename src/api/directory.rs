//! Read-only directory endpoints for resolving assignment targets

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    models::directory::{Employee, Location},
};

/// List employees from the directory
#[utoipa::path(
    get,
    path = "/employees",
    tag = "directory",
    responses(
        (status = 200, description = "Employees", body = Vec<Employee>)
    )
)]
pub async fn list_employees(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Employee>>> {
    let employees = state.services.repository.directory.list_employees().await?;
    Ok(Json(employees))
}

/// List known locations
#[utoipa::path(
    get,
    path = "/locations",
    tag = "directory",
    responses(
        (status = 200, description = "Locations", body = Vec<Location>)
    )
)]
pub async fn list_locations(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Location>>> {
    let locations = state.services.repository.directory.list_locations().await?;
    Ok(Json(locations))
}
