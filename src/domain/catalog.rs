//! Catalog lookup seam

use async_trait::async_trait;

use super::species::SpeciesRecord;
use super::DomainError;

/// Read-only species catalog, queried by name.
///
/// `search` is stateless: results are never persisted until a caller
/// explicitly adds one to a roster. An empty result is not an error.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SpeciesRecord>, DomainError>;
}
