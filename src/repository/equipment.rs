//! Equipment repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EquipmentState,
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment
    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            "SELECT * FROM equipment ORDER BY inventory_code",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Insert a new equipment row within an intake transaction.
    /// State always starts at operational; assignment goes through the mutator.
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        data: &CreateEquipment,
    ) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment
                (serial_number, inventory_code, kind, state, model, vendor,
                 purchase_date, purchase_price, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&data.serial_number)
        .bind(&data.inventory_code)
        .bind(data.kind)
        .bind(EquipmentState::Operational)
        .bind(&data.model)
        .bind(&data.vendor)
        .bind(data.purchase_date)
        .bind(data.purchase_price)
        .bind(&data.notes)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                // Two unique columns; name the one that actually collided
                if db.constraint().is_some_and(|c| c.contains("inventory_code")) {
                    AppError::Conflict(format!(
                        "Inventory code {} already registered",
                        data.inventory_code
                    ))
                } else {
                    AppError::Conflict(format!(
                        "Serial number {} already registered",
                        data.serial_number
                    ))
                }
            }
            _ => AppError::Database(e),
        })?;
        Ok(row)
    }

    /// Update descriptive fields only. The state column is owned by the
    /// transition service and is deliberately not reachable from here.
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        let now = Utc::now();
        sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment SET
                modif_date = $1,
                inventory_code = COALESCE($2, inventory_code),
                model = COALESCE($3, model),
                vendor = COALESCE($4, vendor),
                purchase_date = COALESCE($5, purchase_date),
                purchase_price = COALESCE($6, purchase_price),
                notes = COALESCE($7, notes)
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(&data.inventory_code)
        .bind(&data.model)
        .bind(&data.vendor)
        .bind(data.purchase_date)
        .bind(data.purchase_price)
        .bind(&data.notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Re-read the state column under a row lock. This is the race guard:
    /// a concurrent transition on the same asset blocks here until the
    /// winner commits, then sees the winner's state.
    pub async fn lock_state(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
    ) -> AppResult<EquipmentState> {
        let raw: i16 = sqlx::query_scalar("SELECT state FROM equipment WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;

        EquipmentState::try_from_i16(raw)
            .ok_or_else(|| AppError::InvalidState(format!("Equipment {} has unknown state {}", id, raw)))
    }

    /// Write the state column. Only callable with the transaction that holds
    /// the row lock from `lock_state`.
    pub async fn set_state_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
        state: EquipmentState,
    ) -> AppResult<()> {
        sqlx::query("UPDATE equipment SET state = $1, modif_date = $2 WHERE id = $3")
            .bind(state)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(())
    }

    /// Equipment marked assigned with no active ledger row (orphan-assigned)
    pub async fn find_orphan_assigned(&self) -> AppResult<Vec<Equipment>> {
        let rows = sqlx::query_as::<_, Equipment>(
            r#"
            SELECT e.* FROM equipment e
            WHERE e.state = $1
              AND NOT EXISTS (
                  SELECT 1 FROM assignment_events a
                  WHERE a.equipment_id = e.id AND a.active
              )
            ORDER BY e.id
            "#,
        )
        .bind(EquipmentState::Assigned)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Equipment in a not-assigned state that still has an active ledger row
    /// (orphan-active)
    pub async fn find_orphan_active(&self) -> AppResult<Vec<Equipment>> {
        let not_assigned: Vec<i16> = EquipmentState::NOT_ASSIGNED
            .iter()
            .map(|s| *s as i16)
            .collect();
        let rows = sqlx::query_as::<_, Equipment>(
            r#"
            SELECT e.* FROM equipment e
            WHERE e.state = ANY($1)
              AND EXISTS (
                  SELECT 1 FROM assignment_events a
                  WHERE a.equipment_id = e.id AND a.active
              )
            ORDER BY e.id
            "#,
        )
        .bind(not_assigned)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Equipment in maintenance that retains an active row; legitimate in
    /// some workflows, reported but never auto-corrected
    pub async fn find_maintenance_with_active(&self) -> AppResult<Vec<i32>> {
        let ids: Vec<i32> = sqlx::query_scalar(
            r#"
            SELECT e.id FROM equipment e
            WHERE e.state = $1
              AND EXISTS (
                  SELECT 1 FROM assignment_events a
                  WHERE a.equipment_id = e.id AND a.active
              )
            ORDER BY e.id
            "#,
        )
        .bind(EquipmentState::InMaintenance)
        .fetch_all(&self.pool)
        .await?;
        Ok(ids)
    }
}
