//! HTTP API layer

pub mod error;
pub mod health;
pub mod router;
pub mod search;
pub mod state;
pub mod teams;

pub use error::ApiError;
pub use router::create_router;
pub use state::AppState;
