//! Species catalog search endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::domain::SpeciesRecord;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub species: Vec<SpeciesRecord>,
}

/// GET /api/species/search
///
/// An empty result set is a success, not an error.
pub async fn search_species(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params.q.unwrap_or_default();
    let query = query.trim();

    if query.is_empty() {
        return Err(ApiError::bad_request("Search query is required"));
    }

    debug!(query, "searching species catalog");
    let species = state.catalog.search(query).await?;

    Ok(Json(SearchResponse { species }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_params_missing_q() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert!(params.q.is_none());
    }

    #[test]
    fn test_search_response_shape() {
        let response = SearchResponse {
            species: vec![SpeciesRecord::new(25, "pikachu")],
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.starts_with(r#"{"species":[{"id":25"#));
    }
}
