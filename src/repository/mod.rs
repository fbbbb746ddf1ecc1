//! Repository layer for database operations

pub mod directory;
pub mod equipment;
pub mod ledger;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub ledger: ledger::LedgerRepository,
    pub directory: directory::DirectoryRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            ledger: ledger::LedgerRepository::new(pool.clone()),
            directory: directory::DirectoryRepository::new(pool.clone()),
            pool,
        }
    }
}
