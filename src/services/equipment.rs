//! Equipment service: intake and descriptive updates

use crate::{
    error::AppResult,
    models::{
        enums::{ActionType, TargetType},
        equipment::{CreateEquipment, Equipment, UpdateEquipment},
        ledger::NewAssignmentEvent,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    /// Intake: register the asset and append its CREATION ledger event in
    /// one transaction, so even the first row of history is never missing.
    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let mut tx = self.repository.pool.begin().await?;

        let equipment = self.repository.equipment.create_in_tx(&mut tx, data).await?;

        let creation = NewAssignmentEvent {
            action_type: ActionType::Creation,
            target_type: TargetType::System,
            target_employee_id: None,
            active: false,
            location_id: data.location_id,
            reason: "intake".to_string(),
            notes: None,
            evidence: None,
        };
        self.repository
            .ledger
            .append_event_in_tx(&mut tx, equipment.id, &creation)
            .await?;

        tx.commit().await?;

        tracing::info!(equipment_id = equipment.id, serial = %equipment.serial_number, "equipment registered");
        Ok(equipment)
    }

    /// Descriptive fields only; lifecycle state goes through transitions
    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        self.repository.equipment.update(id, data).await
    }
}
