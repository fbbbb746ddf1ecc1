//! Assignment projection service (read side)

use crate::{
    error::AppResult,
    models::ledger::{AssignmentEventDetails, CurrentAssignment},
    repository::Repository,
};

#[derive(Clone)]
pub struct AssignmentsService {
    repository: Repository,
}

impl AssignmentsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Who holds the asset now, and where it most plausibly is
    pub async fn get_current_assignment(&self, equipment_id: i32) -> AppResult<CurrentAssignment> {
        let mut assignment = self.repository.ledger.get_current_assignment(equipment_id).await?;
        if let Some(location_id) = assignment.location_id {
            let location = self.repository.directory.get_location(location_id).await?;
            assignment.location_name = Some(location.name);
        }
        Ok(assignment)
    }

    /// Full ledger for the asset, newest first
    pub async fn get_history(&self, equipment_id: i32) -> AppResult<Vec<AssignmentEventDetails>> {
        // 404 for unknown assets rather than an empty history
        self.repository.equipment.get_by_id(equipment_id).await?;
        self.repository.ledger.list_history(equipment_id).await
    }
}
