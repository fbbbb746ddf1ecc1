//! Business logic services

pub mod assignments;
pub mod audit;
pub mod equipment;
pub mod reconciler;
pub mod transitions;

use crate::{config::AuditConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub transitions: transitions::TransitionService,
    pub assignments: assignments::AssignmentsService,
    pub reconciler: reconciler::ReconcilerService,
    pub audit: audit::AuditService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, audit_config: AuditConfig) -> Self {
        let audit = audit::AuditService::new(audit_config);
        let transitions =
            transitions::TransitionService::new(repository.clone(), audit.clone());
        Self {
            equipment: equipment::EquipmentService::new(repository.clone()),
            assignments: assignments::AssignmentsService::new(repository.clone()),
            reconciler: reconciler::ReconcilerService::new(repository.clone(), transitions.clone()),
            transitions,
            audit,
            repository,
        }
    }
}
