//! Species catalog backed by the public PokeAPI

use async_trait::async_trait;
use futures::future;
use serde::Deserialize;
use tracing::{debug, warn};

use super::http_client::HttpClientTrait;
use crate::domain::{CatalogProvider, DomainError, SpeciesRecord};

const DEFAULT_CATALOG_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Upstream index page size; large enough to cover the whole catalog
const INDEX_LIMIT: usize = 1500;

/// Maximum number of records a search returns
const MAX_RESULTS: usize = 12;

const SEARCH_FAILED: &str = "Failed to search the species catalog";

/// Catalog provider querying the upstream species API.
///
/// An exact-key hit short-circuits; otherwise the full name index is
/// scanned, prefix matches ranked before names merely containing the
/// query, and detail is fetched for at most [`MAX_RESULTS`] candidates.
#[derive(Debug)]
pub struct PokeApiCatalog<C: HttpClientTrait> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> PokeApiCatalog<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_CATALOG_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self { client, base_url }
    }

    fn detail_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, name)
    }

    fn index_url(&self) -> String {
        format!("{}/pokemon?limit={}", self.base_url, INDEX_LIMIT)
    }

    async fn fetch_exact(&self, query: &str) -> Result<SpeciesRecord, DomainError> {
        let detail = self.client.get_json(&self.detail_url(query)).await?;
        parse_detail(detail)
    }

    async fn fetch_index(&self) -> Result<Vec<IndexEntry>, DomainError> {
        let index = self.client.get_json(&self.index_url()).await.map_err(|e| {
            warn!(error = %e, "catalog index fetch failed");
            DomainError::backend(SEARCH_FAILED)
        })?;

        let index: CatalogIndex = serde_json::from_value(index).map_err(|e| {
            warn!(error = %e, "catalog index parse failed");
            DomainError::backend(SEARCH_FAILED)
        })?;

        Ok(index.results)
    }

    async fn fetch_candidate(&self, entry: &IndexEntry) -> Option<SpeciesRecord> {
        let result = match self.client.get_json(&entry.url).await {
            Ok(detail) => parse_detail(detail),
            Err(e) => Err(e),
        };

        match result {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(name = %entry.name, error = %e, "failed to fetch catalog detail");
                None
            }
        }
    }
}

#[async_trait]
impl<C: HttpClientTrait> CatalogProvider for PokeApiCatalog<C> {
    async fn search(&self, query: &str) -> Result<Vec<SpeciesRecord>, DomainError> {
        let query = query.trim().to_lowercase();

        // An exact-key hit is never diluted with partial matches.
        match self.fetch_exact(&query).await {
            Ok(record) => return Ok(vec![record]),
            Err(e) => debug!(query = %query, error = %e, "exact catalog lookup missed, scanning index"),
        }

        let index = self.fetch_index().await?;

        let (mut candidates, containing): (Vec<_>, Vec<_>) = index
            .into_iter()
            .filter(|entry| entry.name.contains(&query))
            .partition(|entry| entry.name.starts_with(&query));
        candidates.extend(containing);
        candidates.truncate(MAX_RESULTS);

        let fetches = candidates.iter().map(|entry| self.fetch_candidate(entry));
        let records = future::join_all(fetches).await;

        Ok(records.into_iter().flatten().collect())
    }
}

// Upstream wire types

#[derive(Debug, Deserialize)]
struct CatalogIndex {
    results: Vec<IndexEntry>,
}

#[derive(Debug, Deserialize)]
struct IndexEntry {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    id: u32,
    name: String,
    #[serde(default)]
    base_experience: Option<u32>,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    sprites: Sprites,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: NamedResource,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct Sprites {
    front_default: Option<String>,
    #[serde(default)]
    other: Option<AlternateSprites>,
}

#[derive(Debug, Default, Deserialize)]
struct AlternateSprites {
    #[serde(rename = "official-artwork", default)]
    official_artwork: Option<SpriteSet>,
    #[serde(default)]
    dream_world: Option<SpriteSet>,
    #[serde(default)]
    home: Option<SpriteSet>,
}

#[derive(Debug, Default, Deserialize)]
struct SpriteSet {
    front_default: Option<String>,
}

fn parse_detail(detail: serde_json::Value) -> Result<SpeciesRecord, DomainError> {
    let detail: DetailResponse = serde_json::from_value(detail)
        .map_err(|e| DomainError::backend(format!("Failed to parse catalog detail: {}", e)))?;

    let mut record = SpeciesRecord::new(detail.id, detail.name)
        .with_types(detail.types.into_iter().map(|t| t.kind.name).collect())
        .with_base_experience(detail.base_experience.unwrap_or(0));

    if let Some(image) = resolve_image(&detail.sprites) {
        record = record.with_image(image);
    }

    Ok(record)
}

/// First non-null image in the fixed priority order: official artwork,
/// dream-world render, home render, default sprite.
fn resolve_image(sprites: &Sprites) -> Option<String> {
    let other = sprites.other.as_ref();

    other
        .and_then(|o| o.official_artwork.as_ref())
        .and_then(|s| s.front_default.clone())
        .or_else(|| {
            other
                .and_then(|o| o.dream_world.as_ref())
                .and_then(|s| s.front_default.clone())
        })
        .or_else(|| {
            other
                .and_then(|o| o.home.as_ref())
                .and_then(|s| s.front_default.clone())
        })
        .or_else(|| sprites.front_default.clone())
}
