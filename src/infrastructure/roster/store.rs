//! Dual-backend roster store
//!
//! Owns the durable representation of teams. Every operation attempts the
//! hosted backend first when one is configured; on ANY error from that
//! attempt the operation falls through, once, to the local fallback store.
//! The hosted error is logged, never surfaced. This is not a retry and the
//! two tiers are never reconciled: a mutation that lands only in the
//! fallback diverges silently. Reads prefer hosted truth when reachable.
//!
//! Input validation and the roster invariants (capacity, duplicate
//! membership, existence for adds) are applied here, against the
//! dual-path read view, before a write is dispatched. The check-then-write
//! sequence is not transactional; concurrent writers can violate the
//! invariants (accepted risk).

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{info, warn};

use crate::domain::{
    validate_team_name, DomainError, RosterBackend, Source, Sourced, SpeciesId, SpeciesRecord,
    Team, TeamId, UserId,
};

/// Two-tier team store with hosted-first precedence
#[derive(Debug)]
pub struct RosterStore {
    hosted: Option<Arc<dyn RosterBackend>>,
    fallback: Arc<dyn RosterBackend>,
}

impl RosterStore {
    pub fn new(hosted: Option<Arc<dyn RosterBackend>>, fallback: Arc<dyn RosterBackend>) -> Self {
        Self { hosted, fallback }
    }

    /// Single attempt per tier: hosted first when configured, then the
    /// fallback. The result is tagged with the tier that served it.
    async fn attempt<'a, T, F>(&'a self, op: F) -> Result<Sourced<T>, DomainError>
    where
        F: Fn(&'a dyn RosterBackend) -> BoxFuture<'a, Result<T, DomainError>>,
    {
        if let Some(hosted) = &self.hosted {
            match op(hosted.as_ref()).await {
                Ok(value) => return Ok(Sourced::new(value, Source::Hosted)),
                Err(e) => {
                    warn!(error = %e, "hosted roster backend failed, using the fallback store");
                }
            }
        }

        let value = op(self.fallback.as_ref()).await?;
        Ok(Sourced::new(value, Source::Fallback))
    }

    /// The user's teams, ascending by creation time
    pub async fn list_teams(&self, user: &UserId) -> Result<Sourced<Vec<Team>>, DomainError> {
        self.attempt(|backend| backend.list_teams(user))
            .await
    }

    /// Create an empty team with a generated identifier
    pub async fn create_team(
        &self,
        name: &str,
        user: &UserId,
    ) -> Result<Sourced<Team>, DomainError> {
        let team = Team::new(name, user.clone())
            .map_err(|e| DomainError::validation(e.to_string()))?;
        info!(team_id = %team.id(), name = %team.name(), "creating team");

        let team_ref = &team;
        let source = self
            .attempt(|backend| backend.insert_team(team_ref))
            .await?
            .source;

        Ok(Sourced::new(team, source))
    }

    /// Rename a team. A no-op when the id is unknown to the serving tier.
    pub async fn rename_team(&self, id: &TeamId, name: &str) -> Result<Sourced<()>, DomainError> {
        let name = name.trim();
        validate_team_name(name).map_err(|e| DomainError::validation(e.to_string()))?;
        info!(team_id = %id, "renaming team");

        self.attempt(|backend| backend.rename_team(id, name))
            .await
    }

    /// Delete a team and its member associations. A no-op when the id is
    /// unknown to the serving tier.
    pub async fn delete_team(&self, id: &TeamId) -> Result<Sourced<()>, DomainError> {
        info!(team_id = %id, "deleting team");

        self.attempt(|backend| backend.delete_team(id))
            .await
    }

    /// Append a member to a team, upserting the species record into shared
    /// storage as a side effect.
    pub async fn add_member(
        &self,
        user: &UserId,
        id: &TeamId,
        species: SpeciesRecord,
    ) -> Result<Sourced<()>, DomainError> {
        let teams = self.list_teams(user).await?.value;
        let team = teams
            .iter()
            .find(|t| t.id() == id)
            .ok_or_else(|| DomainError::not_found(format!("Team '{}' not found", id)))?;

        if team.is_full() {
            return Err(DomainError::capacity(format!(
                "Team is full (maximum {} members)",
                Team::MAX_MEMBERS
            )));
        }
        if team.has_member(species.id()) {
            return Err(DomainError::duplicate("This species is already in the team"));
        }

        // 1-based storage position, computed from the read view
        let position = team.members().len() + 1;
        info!(team_id = %id, species_id = species.id(), position, "adding team member");

        let species_ref = &species;
        self.attempt(|backend| backend.add_member(id, species_ref, position))
            .await
    }

    /// Remove a member from a team. A no-op when the member is absent.
    pub async fn remove_member(
        &self,
        id: &TeamId,
        species_id: SpeciesId,
    ) -> Result<Sourced<()>, DomainError> {
        info!(team_id = %id, species_id, "removing team member");

        self.attempt(|backend| backend.remove_member(id, species_id))
            .await
    }
}
