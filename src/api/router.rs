use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::state::AppState;
use super::{health, search, teams};

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        // Roster API
        .nest("/api", api_router())
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route("/species/search", get(search::search_species))
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/teams/{team_id}",
            put(teams::rename_team).delete(teams::delete_team),
        )
        .route(
            "/teams/{team_id}/members",
            post(teams::add_member).delete(teams::remove_member),
        )
}
