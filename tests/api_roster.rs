//! Roster HTTP surface driven end to end against a fallback-only store

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use rosterdex::api::{create_router, AppState};
use rosterdex::domain::{CatalogProvider, DomainError, SpeciesRecord};
use rosterdex::infrastructure::{LocalRosterBackend, RosterStore};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Catalog stub resolving a fixed record set; roster tests stay offline
#[derive(Debug)]
struct StaticCatalog;

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn search(&self, query: &str) -> Result<Vec<SpeciesRecord>, DomainError> {
        let known = [
            SpeciesRecord::new(25, "pikachu").with_types(vec!["electric".to_string()]),
            SpeciesRecord::new(26, "raichu").with_types(vec!["electric".to_string()]),
        ];

        Ok(known
            .into_iter()
            .filter(|s| s.name().contains(query))
            .collect())
    }
}

fn app() -> Router {
    let snapshot = std::env::temp_dir().join(format!("rosterdex-api-{}.json", rand::random::<u64>()));
    let fallback = Arc::new(LocalRosterBackend::new(snapshot).unwrap());
    let roster = Arc::new(RosterStore::new(None, fallback));

    create_router(AppState::new(Arc::new(StaticCatalog), roster))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

fn species_body(id: u32, name: &str, types: &[&str], base_experience: u32) -> Value {
    json!({
        "species": {
            "id": id,
            "name": name,
            "types": types,
            "base_experience": base_experience
        }
    })
}

#[tokio::test]
async fn create_add_and_list_round_trip() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/teams", Some(json!({"name": "Alpha"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team"]["name"], "Alpha");
    assert_eq!(body["source"], "fallback");
    let team_id = body["team"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/teams/{team_id}/members"),
        Some(species_body(25, "pikachu", &["electric"], 112)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/teams/{team_id}/members"),
        Some(species_body(6, "charizard", &["fire", "flying"], 267)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/api/teams", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    let teams = body["teams"].as_array().unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0]["name"], "Alpha");

    let member_names: Vec<&str> = teams[0]["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(member_names, ["pikachu", "charizard"]);
}

#[tokio::test]
async fn blank_team_name_is_a_400() {
    let app = app();

    let (status, body) = send(&app, "POST", "/api/teams", Some(json!({"name": "   "}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("name"));
}

#[tokio::test]
async fn duplicate_and_capacity_are_conflicts() {
    let app = app();

    let (_, body) = send(&app, "POST", "/api/teams", Some(json!({"name": "Alpha"}))).await;
    let team_id = body["team"]["id"].as_str().unwrap().to_string();
    let members_uri = format!("/api/teams/{team_id}/members");

    for id in 1..=6u32 {
        let (status, _) = send(
            &app,
            "POST",
            &members_uri,
            Some(species_body(id, &format!("species-{id}"), &[], 0)),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // 7th member: capacity
    let (status, body) = send(
        &app,
        "POST",
        &members_uri,
        Some(species_body(7, "species-7", &[], 0)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("full"));

    // Remove one, then re-adding a present id is a duplicate
    let (status, _) = send(&app, "DELETE", &format!("{members_uri}?speciesId=6"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        &members_uri,
        Some(species_body(1, "species-1", &[], 0)),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already"));
}

#[tokio::test]
async fn adding_to_an_unknown_team_is_a_404() {
    let app = app();

    let (status, _) = send(
        &app,
        "POST",
        "/api/teams/missing/members",
        Some(species_body(25, "pikachu", &[], 0)),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_member_requests_are_400s() {
    let app = app();

    let (_, body) = send(&app, "POST", "/api/teams", Some(json!({"name": "Alpha"}))).await;
    let team_id = body["team"]["id"].as_str().unwrap().to_string();
    let members_uri = format!("/api/teams/{team_id}/members");

    let (status, _) = send(
        &app,
        "POST",
        &members_uri,
        Some(json!({"species": {"id": 0, "name": ""}})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", &members_uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "DELETE", &format!("{members_uri}?speciesId=abc"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rename_round_trip_and_missing_id_noop() {
    let app = app();

    let (_, body) = send(&app, "POST", "/api/teams", Some(json!({"name": "Alpha"}))).await;
    let team_id = body["team"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/teams/{team_id}"),
        Some(json!({"name": "  Beta  "})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = send(&app, "GET", "/api/teams", None).await;
    assert_eq!(body["teams"][0]["name"], "Beta");
    assert_eq!(body["teams"][0]["id"], team_id.as_str());

    // Unknown id: silent no-op success
    let (status, _) = send(
        &app,
        "PUT",
        "/api/teams/missing",
        Some(json!({"name": "Gamma"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = app();

    let (_, body) = send(&app, "POST", "/api/teams", Some(json!({"name": "Alpha"}))).await;
    let team_id = body["team"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "DELETE", &format!("/api/teams/{team_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "DELETE", &format!("/api/teams/{team_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/teams", None).await;
    assert!(body["teams"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn search_requires_a_query() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/species/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Search query is required");

    let (status, body) = send(&app, "GET", "/api/species/search?q=chu", None).await;
    assert_eq!(status, StatusCode::OK);
    let species = body["species"].as_array().unwrap();
    assert_eq!(species.len(), 2);
}

#[tokio::test]
async fn teams_are_scoped_to_the_requesting_user() {
    let app = app();

    send(
        &app,
        "POST",
        "/api/teams",
        Some(json!({"name": "Mine", "userId": "ash"})),
    )
    .await;
    send(&app, "POST", "/api/teams", Some(json!({"name": "Default"}))).await;

    let (_, body) = send(&app, "GET", "/api/teams?userId=ash", None).await;
    let teams = body["teams"].as_array().unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0]["name"], "Mine");
    assert_eq!(teams[0]["user_id"], "ash");

    let (_, body) = send(&app, "GET", "/api/teams", None).await;
    assert_eq!(body["teams"][0]["name"], "Default");
}
