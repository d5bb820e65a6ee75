//! Application state management

use database::postgres::DatabaseConnection;
use domain_products::PgProductStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub db: DatabaseConnection,
    /// One store for both transports
    pub store: Arc<PgProductStore>,
}

impl AppState {
    pub fn new(config: crate::config::Config, db: DatabaseConnection) -> Self {
        let store = Arc::new(PgProductStore::new(db.clone()));
        Self { config, db, store }
    }
}
