//! Catalog search over the real HTTP client against a mock upstream

use rosterdex::domain::CatalogProvider;
use rosterdex::infrastructure::{HttpClient, PokeApiCatalog};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn detail_body(id: u32, name: &str, types: &[&str], base_experience: u32) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "base_experience": base_experience,
        "types": types
            .iter()
            .map(|t| json!({"slot": 1, "type": {"name": t, "url": ""}}))
            .collect::<Vec<_>>(),
        "sprites": {
            "front_default": format!("https://img.test/{name}.png"),
            "other": {
                "official-artwork": {"front_default": format!("https://img.test/{name}-artwork.png")}
            }
        }
    })
}

fn index_body(server: &MockServer, names: &[&str]) -> serde_json::Value {
    json!({
        "count": names.len(),
        "results": names
            .iter()
            .map(|n| json!({"name": n, "url": format!("{}/pokemon/{n}", server.uri())}))
            .collect::<Vec<_>>()
    })
}

async fn mount_detail(server: &MockServer, id: u32, name: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/pokemon/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_body(id, name, &[], 0)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn exact_match_returns_a_single_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(detail_body(25, "pikachu", &["electric"], 112)),
        )
        .mount(&server)
        .await;

    let catalog = PokeApiCatalog::with_base_url(HttpClient::new(), server.uri());
    let results = catalog.search("Pikachu").await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id(), 25);
    assert_eq!(results[0].name(), "pikachu");
    assert_eq!(
        results[0].image(),
        Some("https://img.test/pikachu-artwork.png")
    );
}

#[tokio::test]
async fn exact_miss_scans_the_index_prefix_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/pikach"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("limit", "1500"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(index_body(&server, &["raichu", "spikach", "pikachu"])),
        )
        .mount(&server)
        .await;
    mount_detail(&server, 901, "spikach").await;
    mount_detail(&server, 25, "pikachu").await;

    let catalog = PokeApiCatalog::with_base_url(HttpClient::new(), server.uri());
    let results = catalog.search("pikach").await.unwrap();

    let names: Vec<&str> = results.iter().map(|r| r.name()).collect();
    assert_eq!(names, ["pikachu", "spikach"]);
}

#[tokio::test]
async fn no_index_match_is_an_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/zzznotreal"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("limit", "1500"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(index_body(&server, &["pikachu", "raichu"])),
        )
        .mount(&server)
        .await;

    let catalog = PokeApiCatalog::with_base_url(HttpClient::new(), server.uri());
    let results = catalog.search("zzznotreal").await.unwrap();

    assert!(results.is_empty());
}

#[tokio::test]
async fn failing_detail_fetches_are_dropped_from_the_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/chu"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("limit", "1500"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(index_body(&server, &["pikachu", "raichu"])),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_detail(&server, 26, "raichu").await;

    let catalog = PokeApiCatalog::with_base_url(HttpClient::new(), server.uri());
    let results = catalog.search("chu").await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name(), "raichu");
}
