//! Roster persistence seam
//!
//! Both persistence tiers (the hosted relational backend and the local
//! fallback store) implement [`RosterBackend`]. The store layer decides
//! which tier serves a call and tags every result with its [`Source`] so
//! callers and tests can assert which path produced a response.

use async_trait::async_trait;
use serde::Serialize;

use super::species::{SpeciesId, SpeciesRecord};
use super::team::{Team, TeamId, UserId};
use super::DomainError;

/// Which persistence tier served an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// The hosted relational backend
    Hosted,
    /// The local single-snapshot fallback store
    Fallback,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hosted => write!(f, "hosted"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// A store result together with the tier that produced it
#[derive(Debug, Clone)]
pub struct Sourced<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Sourced<T> {
    pub fn new(value: T, source: Source) -> Self {
        Self { value, source }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

/// A persistence tier for teams and their member entries.
///
/// Implementations are mechanism only: input validation and the
/// capacity/duplicate/existence invariants are applied by the store before
/// a write is dispatched. Mutations on ids the tier does not know are
/// silent no-ops; divergence between tiers is accepted, never reconciled.
#[async_trait]
pub trait RosterBackend: Send + Sync + std::fmt::Debug {
    /// List the user's teams, ascending by creation time, members in
    /// position order.
    async fn list_teams(&self, user: &UserId) -> Result<Vec<Team>, DomainError>;

    /// Persist a newly created team
    async fn insert_team(&self, team: &Team) -> Result<(), DomainError>;

    /// Rename a team. `name` is already trimmed and validated.
    async fn rename_team(&self, id: &TeamId, name: &str) -> Result<(), DomainError>;

    /// Delete a team and all its member associations
    async fn delete_team(&self, id: &TeamId) -> Result<(), DomainError>;

    /// Append a member entry. `position` is the 1-based storage position;
    /// the species record is upserted into shared storage as a side effect.
    async fn add_member(
        &self,
        id: &TeamId,
        species: &SpeciesRecord,
        position: usize,
    ) -> Result<(), DomainError>;

    /// Remove a member entry, if present
    async fn remove_member(&self, id: &TeamId, species_id: SpeciesId) -> Result<(), DomainError>;
}
