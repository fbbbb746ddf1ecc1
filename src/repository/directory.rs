//! Organizational directory repository (read-only)
//!
//! The directory is owned by HR tooling; this service only resolves
//! assignment targets and location labels against it.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::directory::{Employee, Location},
};

#[derive(Clone)]
pub struct DirectoryRepository {
    pool: Pool<Postgres>,
}

impl DirectoryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, Employee>(
            "SELECT id, firstname, lastname, email, department FROM employees ORDER BY lastname, firstname",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_employee(&self, id: i32) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>(
            "SELECT id, firstname, lastname, email, department FROM employees WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NoSuchEmployee(format!("Employee {} not found", id)))
    }

    pub async fn list_locations(&self) -> AppResult<Vec<Location>> {
        let rows = sqlx::query_as::<_, Location>(
            "SELECT id, name, site FROM locations ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_location(&self, id: i32) -> AppResult<Location> {
        sqlx::query_as::<_, Location>("SELECT id, name, site FROM locations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Location {} not found", id)))
    }
}
