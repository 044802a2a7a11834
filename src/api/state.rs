//! Application state for shared services

use std::sync::Arc;

use crate::domain::CatalogProvider;
use crate::infrastructure::RosterStore;

/// Shared services handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogProvider>,
    pub roster: Arc<RosterStore>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogProvider>, roster: Arc<RosterStore>) -> Self {
        Self { catalog, roster }
    }
}
