//! Domain layer - entities, persistence seams and errors

pub mod catalog;
pub mod error;
pub mod roster;
pub mod species;
pub mod team;

pub use catalog::CatalogProvider;
pub use error::DomainError;
pub use roster::{RosterBackend, Source, Sourced};
pub use species::{SpeciesId, SpeciesRecord};
pub use team::{validate_team_name, Team, TeamId, TeamValidationError, UserId};
