//! Assignment ledger repository
//!
//! The ledger is append-only. The only in-place write this module exposes is
//! flipping `active` from true to false when a row is superseded; there is
//! deliberately no general update.

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::ledger::{AssignmentEvent, AssignmentEventDetails, CurrentAssignment, NewAssignmentEvent},
};

#[derive(Clone)]
pub struct LedgerRepository {
    pool: Pool<Postgres>,
}

impl LedgerRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append one ledger row within the mutator's transaction
    pub async fn append_event_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        equipment_id: i32,
        event: &NewAssignmentEvent,
    ) -> AppResult<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO assignment_events
                (equipment_id, action_type, target_type, target_employee_id,
                 active, location_id, reason, notes, evidence)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(equipment_id)
        .bind(event.action_type)
        .bind(event.target_type)
        .bind(event.target_employee_id)
        .bind(event.active)
        .bind(event.location_id)
        .bind(&event.reason)
        .bind(&event.notes)
        .bind(&event.evidence)
        .fetch_one(&mut **tx)
        .await?;
        Ok(id)
    }

    /// Flip every active row for the asset to inactive, returning the rows
    /// that were deactivated. Zero rows affected is not an error.
    pub async fn deactivate_all_active_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        equipment_id: i32,
    ) -> AppResult<Vec<AssignmentEvent>> {
        let rows = sqlx::query_as::<_, AssignmentEvent>(
            r#"
            UPDATE assignment_events
            SET active = FALSE
            WHERE equipment_id = $1 AND active
            RETURNING *
            "#,
        )
        .bind(equipment_id)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows)
    }

    /// The single active row for an asset, if any
    pub async fn find_active_event(&self, equipment_id: i32) -> AppResult<Option<AssignmentEvent>> {
        let row = sqlx::query_as::<_, AssignmentEvent>(
            "SELECT * FROM assignment_events WHERE equipment_id = $1 AND active",
        )
        .bind(equipment_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Most recent row that named an employee, active or not. Used by
    /// reconciliation to recover a plausible holder for a dangling
    /// assigned state.
    pub async fn find_last_event_with_employee(
        &self,
        equipment_id: i32,
    ) -> AppResult<Option<AssignmentEvent>> {
        let row = sqlx::query_as::<_, AssignmentEvent>(
            r#"
            SELECT * FROM assignment_events
            WHERE equipment_id = $1 AND target_employee_id IS NOT NULL
            ORDER BY event_date DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(equipment_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Most recent row carrying a location, active or not
    pub async fn find_latest_location(&self, equipment_id: i32) -> AppResult<Option<i32>> {
        let location: Option<i32> = sqlx::query_scalar(
            r#"
            SELECT location_id FROM assignment_events
            WHERE equipment_id = $1 AND location_id IS NOT NULL
            ORDER BY event_date DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(equipment_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(location)
    }

    /// Full history for an asset, newest first, with display names resolved
    pub async fn list_history(&self, equipment_id: i32) -> AppResult<Vec<AssignmentEventDetails>> {
        let rows = sqlx::query_as::<_, AssignmentEventDetails>(
            r#"
            SELECT a.id, a.equipment_id, a.event_date, a.action_type,
                   a.target_type, a.target_employee_id,
                   CASE WHEN emp.id IS NULL THEN NULL
                        ELSE emp.firstname || ' ' || emp.lastname END as target_employee_name,
                   a.active, a.location_id, loc.name as location_name,
                   a.reason, a.notes, a.evidence
            FROM assignment_events a
            LEFT JOIN employees emp ON emp.id = a.target_employee_id
            LEFT JOIN locations loc ON loc.id = a.location_id
            WHERE a.equipment_id = $1
            ORDER BY a.event_date DESC, a.id DESC
            "#,
        )
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Current-assignment projection: state from the equipment row, holder
    /// from the active ledger row, location from the active row when set,
    /// else the most recent row carrying one.
    pub async fn get_current_assignment(&self, equipment_id: i32) -> AppResult<CurrentAssignment> {
        let row = sqlx::query_as::<_, CurrentAssignmentRow>(
            r#"
            SELECT e.id as equipment_id, e.state as state_raw,
                   act.target_employee_id,
                   CASE WHEN emp.id IS NULL THEN NULL
                        ELSE emp.firstname || ' ' || emp.lastname END as target_employee_name,
                   COALESCE(act.location_id, (
                       SELECT a2.location_id FROM assignment_events a2
                       WHERE a2.equipment_id = e.id AND a2.location_id IS NOT NULL
                       ORDER BY a2.event_date DESC, a2.id DESC
                       LIMIT 1
                   )) as location_id
            FROM equipment e
            LEFT JOIN assignment_events act
                   ON act.equipment_id = e.id AND act.active
            LEFT JOIN employees emp ON emp.id = act.target_employee_id
            WHERE e.id = $1
            "#,
        )
        .bind(equipment_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", equipment_id)))?;

        let state = crate::models::enums::EquipmentState::try_from_i16(row.state_raw)
            .ok_or_else(|| {
                AppError::InvalidState(format!(
                    "Equipment {} has unknown state {}",
                    equipment_id, row.state_raw
                ))
            })?;

        // Location display name is resolved by the projection service
        // against the directory.
        Ok(CurrentAssignment {
            equipment_id: row.equipment_id,
            state,
            target_employee_id: row.target_employee_id,
            target_employee_name: row.target_employee_name,
            location_id: row.location_id,
            location_name: None,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CurrentAssignmentRow {
    equipment_id: i32,
    state_raw: i16,
    target_employee_id: Option<i32>,
    target_employee_name: Option<String>,
    location_id: Option<i32>,
}
