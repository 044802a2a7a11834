//! Infrastructure layer - concrete backends and clients

pub mod catalog;
pub mod logging;
pub mod roster;

pub use catalog::{HttpClient, PokeApiCatalog};
pub use roster::{HostedRosterBackend, LocalRosterBackend, RosterStore};
