//! Local fallback store
//!
//! Holds one JSON-serializable snapshot of the entire team list in a
//! single well-known file. Every mutation reads the full snapshot, applies
//! the change, and writes the full snapshot back; there is no partial
//! update. Consistent within one process, last-write-wins across
//! concurrent writers.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::warn;

use crate::domain::{DomainError, RosterBackend, SpeciesId, SpeciesRecord, Team, TeamId, UserId};

const READ_FAILED: &str = "Failed to read the local roster store";
const WRITE_FAILED: &str = "Failed to write the local roster store";

/// Snapshot-per-mutation fallback backend
#[derive(Debug)]
pub struct LocalRosterBackend {
    path: PathBuf,
    // guards the read-apply-write cycle within this process
    slot: RwLock<()>,
}

impl LocalRosterBackend {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    warn!(path = %parent.display(), error = %e, "failed to create snapshot directory");
                    DomainError::backend(WRITE_FAILED)
                })?;
            }
        }

        Ok(Self {
            path,
            slot: RwLock::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing snapshot is an empty list; a corrupt one is logged and
    /// discarded rather than surfaced.
    fn load_snapshot(&self) -> Result<Vec<Team>, DomainError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "failed to read roster snapshot");
            DomainError::backend(READ_FAILED)
        })?;

        match serde_json::from_str(&raw) {
            Ok(teams) => Ok(teams),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "discarding corrupt roster snapshot");
                Ok(Vec::new())
            }
        }
    }

    fn store_snapshot(&self, teams: &[Team]) -> Result<(), DomainError> {
        let raw = serde_json::to_string(teams).map_err(|e| {
            warn!(error = %e, "failed to serialize roster snapshot");
            DomainError::backend(WRITE_FAILED)
        })?;

        fs::write(&self.path, raw).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "failed to write roster snapshot");
            DomainError::backend(WRITE_FAILED)
        })
    }
}

fn lock_error<T>(_: PoisonError<T>) -> DomainError {
    DomainError::backend("Local roster store lock poisoned")
}

#[async_trait]
impl RosterBackend for LocalRosterBackend {
    async fn list_teams(&self, user: &UserId) -> Result<Vec<Team>, DomainError> {
        let _guard = self.slot.read().map_err(lock_error)?;

        let teams = self.load_snapshot()?;
        Ok(teams.into_iter().filter(|t| t.user_id() == user).collect())
    }

    async fn insert_team(&self, team: &Team) -> Result<(), DomainError> {
        let _guard = self.slot.write().map_err(lock_error)?;

        let mut teams = self.load_snapshot()?;
        teams.push(team.clone());
        self.store_snapshot(&teams)
    }

    async fn rename_team(&self, id: &TeamId, name: &str) -> Result<(), DomainError> {
        let _guard = self.slot.write().map_err(lock_error)?;

        let mut teams = self.load_snapshot()?;
        if let Some(team) = teams.iter_mut().find(|t| t.id() == id) {
            team.rename(name)
                .map_err(|e| DomainError::validation(e.to_string()))?;
        }
        self.store_snapshot(&teams)
    }

    async fn delete_team(&self, id: &TeamId) -> Result<(), DomainError> {
        let _guard = self.slot.write().map_err(lock_error)?;

        let mut teams = self.load_snapshot()?;
        teams.retain(|t| t.id() != id);
        self.store_snapshot(&teams)
    }

    async fn add_member(
        &self,
        id: &TeamId,
        species: &SpeciesRecord,
        _position: usize,
    ) -> Result<(), DomainError> {
        let _guard = self.slot.write().map_err(lock_error)?;

        let mut teams = self.load_snapshot()?;
        if let Some(team) = teams.iter_mut().find(|t| t.id() == id) {
            team.push_member(species.clone());
        }
        self.store_snapshot(&teams)
    }

    async fn remove_member(&self, id: &TeamId, species_id: SpeciesId) -> Result<(), DomainError> {
        let _guard = self.slot.write().map_err(lock_error)?;

        let mut teams = self.load_snapshot()?;
        if let Some(team) = teams.iter_mut().find(|t| t.id() == id) {
            team.remove_member(species_id);
        }
        self.store_snapshot(&teams)
    }
}
