//! Rosterdex
//!
//! A team-building backend for a creature-collection catalog:
//! - free-text species search against the external catalog
//! - persistent team rosters (capacity 6, ordered, no duplicate species)
//! - dual persistence: a hosted relational backend with a transparent,
//!   one-directional fallback to a local snapshot store

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::{info, warn};

use api::state::AppState;
use domain::{CatalogProvider, RosterBackend};
use infrastructure::{HostedRosterBackend, HttpClient, LocalRosterBackend, PokeApiCatalog, RosterStore};

/// Create the application state with all services initialized.
///
/// The hosted backend is optional: when it is unconfigured, or configured
/// but unreachable at startup, the store runs on the fallback snapshot
/// alone rather than failing to start.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let catalog: Arc<dyn CatalogProvider> = Arc::new(PokeApiCatalog::with_base_url(
        HttpClient::new(),
        &config.catalog.base_url,
    ));

    let database_url = config
        .storage
        .database_url
        .clone()
        .or_else(|| std::env::var("DATABASE_URL").ok());

    let hosted: Option<Arc<dyn RosterBackend>> = match database_url {
        Some(url) => match HostedRosterBackend::connect(&url).await {
            Ok(backend) => {
                info!("Hosted roster backend connected");
                Some(Arc::new(backend))
            }
            Err(e) => {
                warn!(error = %e, "Hosted roster backend unavailable, using the fallback store only");
                None
            }
        },
        None => {
            info!("No database configured, using the fallback store");
            None
        }
    };

    let fallback = Arc::new(LocalRosterBackend::new(&config.storage.snapshot_path)?);
    let roster = Arc::new(RosterStore::new(hosted, fallback));

    Ok(AppState::new(catalog, roster))
}
