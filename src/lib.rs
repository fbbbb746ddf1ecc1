//! Inventis IT Asset Inventory
//!
//! A Rust implementation of the Inventis asset tracking server: equipment
//! lifecycle states, an append-only assignment ledger, and the reconciler
//! that keeps the two consistent.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod transitions;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
