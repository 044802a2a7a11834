//! Team entity and related types

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::validation::{validate_team_name, TeamValidationError};
use crate::domain::species::{SpeciesId, SpeciesRecord};

const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Owner of a set of teams.
///
/// There is no auth context in this system; callers that have no user
/// identity pass the fixed sentinel from [`UserId::default_user`]. The
/// store itself never special-cases it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub const DEFAULT: &'static str = "default_user";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The implicit single-user sentinel
    pub fn default_user() -> Self {
        Self(Self::DEFAULT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque team identifier, generated client-side at creation.
///
/// Uniqueness is probabilistic (random entropy plus a timestamp suffix),
/// not guaranteed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh identifier: nine random base-36 characters followed
    /// by the current millisecond timestamp in base 36.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut id = String::with_capacity(18);

        for _ in 0..9 {
            id.push(BASE36_ALPHABET[rng.gen_range(0..36)] as char);
        }
        id.push_str(&to_base36(Utc::now().timestamp_millis() as u64));

        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_ALPHABET[(n % 36) as usize]);
        n /= 36;
    }

    digits.iter().rev().map(|&b| b as char).collect()
}

/// Team entity: a named, ordered, capacity-bounded roster of species.
///
/// Member order is insertion order and survives persistence round-trips.
/// Capacity and duplicate-membership invariants are checked by the store
/// against its read view before a write is dispatched; the entity exposes
/// the predicates and performs the plain mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Unique identifier
    id: TeamId,
    /// Display name, non-empty after trimming
    name: String,
    /// Owning user
    user_id: UserId,
    /// Ordered member sequence, at most [`Team::MAX_MEMBERS`] entries
    #[serde(default)]
    members: Vec<SpeciesRecord>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
    /// Last update timestamp
    updated_at: DateTime<Utc>,
}

impl Team {
    /// Maximum number of member entries per team
    pub const MAX_MEMBERS: usize = 6;

    /// Create a new empty team with a generated identifier.
    ///
    /// The name is trimmed before validation and storage.
    pub fn new(name: impl Into<String>, user_id: UserId) -> Result<Self, TeamValidationError> {
        let name = name.into().trim().to_string();
        validate_team_name(&name)?;
        let now = Utc::now();

        Ok(Self {
            id: TeamId::generate(),
            name,
            user_id,
            members: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reassemble a persisted team. For storage backends only; invariants
    /// are assumed to have held when the team was written.
    pub(crate) fn restore(
        id: TeamId,
        name: String,
        user_id: UserId,
        members: Vec<SpeciesRecord>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            user_id,
            members,
            created_at,
            updated_at,
        }
    }

    // Getters

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn members(&self) -> &[SpeciesRecord] {
        &self.members
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= Self::MAX_MEMBERS
    }

    pub fn has_member(&self, species_id: SpeciesId) -> bool {
        self.members.iter().any(|m| m.id() == species_id)
    }

    // Mutators

    /// Rename the team. The name is trimmed before validation and storage.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), TeamValidationError> {
        let name = name.into().trim().to_string();
        validate_team_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    /// Append a member at the end of the sequence.
    ///
    /// Does not enforce capacity or duplicate invariants; callers check
    /// [`Team::is_full`] and [`Team::has_member`] first.
    pub fn push_member(&mut self, species: SpeciesRecord) {
        self.members.push(species);
    }

    /// Remove the member with the given species id, if present
    pub fn remove_member(&mut self, species_id: SpeciesId) {
        self.members.retain(|m| m.id() != species_id);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
