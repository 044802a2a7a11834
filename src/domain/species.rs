//! Species records resolved from the external catalog

use serde::{Deserialize, Serialize};

/// Catalog-assigned numeric species identifier, stable across fetches
pub type SpeciesId = u32;

/// A species record as resolved from the catalog.
///
/// Immutable once fetched; the catalog is the only producer. Records are
/// shared data keyed by id, never owned by a single team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    id: SpeciesId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    base_experience: u32,
}

impl SpeciesRecord {
    /// Create a record with the lowercase canonical name the catalog uses
    pub fn new(id: SpeciesId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: None,
            types: Vec::new(),
            base_experience: 0,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_types(mut self, types: Vec<String>) -> Self {
        self.types = types;
        self
    }

    pub fn with_base_experience(mut self, base_experience: u32) -> Self {
        self.base_experience = base_experience;
        self
    }

    pub fn id(&self) -> SpeciesId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn base_experience(&self) -> u32 {
        self.base_experience
    }
}
