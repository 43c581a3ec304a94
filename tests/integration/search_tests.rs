//! End-to-end tests for indexing, ranking and snapshots

use crate::{create_test_config, html_page};
use quarry::storage::SqliteStorage;
use quarry::text::{StopWords, Thesaurus};
use quarry::Engine;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves a home page linking to a page about cars and one about gardens
async fn start_site() -> MockServer {
    let mock_server = MockServer::start().await;

    let pages = [
        (
            "/",
            html_page(
                "Home",
                r#"<p>welcome visitor</p><a href="cars.html">first</a><a href="garden.html">second</a>"#,
            ),
        ),
        (
            "/cars.html",
            html_page("Cars", "<p>the automobile engine needs repair</p>"),
        ),
        (
            "/garden.html",
            html_page("Garden", "<p>the garden flowers need soil</p>"),
        ),
    ];

    for (page_path, body) in pages {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(body)
                    .insert_header("content-type", "text/html"),
            )
            .mount(&mock_server)
            .await;
    }

    mock_server
}

fn engine_for(seed_url: &str) -> Engine {
    Engine::with_lexicon(
        create_test_config(seed_url, 10),
        "test-hash",
        StopWords::from_words(["the"]),
        Thesaurus::parse("car, automobile").expect("valid thesaurus"),
    )
    .expect("Failed to create engine")
}

#[tokio::test]
async fn test_build_index_and_search() {
    let mock_server = start_site().await;
    let mut engine = engine_for(&mock_server.uri());

    let report = engine.build_index().await.expect("Crawl failed");
    assert_eq!(report.pages_indexed, 3);

    let matrix = engine.matrix().expect("matrix should be built");
    assert_eq!(matrix.doc_count(), 3);
    assert!(matrix.term_index("garden").is_some());

    let results = engine.search("garden").expect("query should be valid");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "/garden.html");
    assert_eq!(results[0].title, "Garden");
    assert!(results[0].score > 0.25);
    assert_eq!(results[0].snippet, "garden flowers need soil");
}

#[tokio::test]
async fn test_search_expands_with_thesaurus() {
    let mock_server = start_site().await;
    let mut engine = engine_for(&mock_server.uri());
    engine.build_index().await.expect("Crawl failed");

    // No page mentions "car"; its synonym matches the cars page
    let results = engine.search("the car").expect("query should be valid");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].url, "/cars.html");
}

#[tokio::test]
async fn test_invalid_query_is_rejected() {
    let mock_server = start_site().await;
    let mut engine = engine_for(&mock_server.uri());
    engine.build_index().await.expect("Crawl failed");

    assert!(engine.search("garden 42").is_err());
}

#[tokio::test]
async fn test_clusters_cover_every_document() {
    let mock_server = start_site().await;
    let mut engine = engine_for(&mock_server.uri());
    engine.build_index().await.expect("Crawl failed");

    let clusters = engine.clusters().expect("clusters should be built");
    assert_eq!(clusters.len(), 2);

    let followers: usize = clusters
        .groups
        .iter()
        .map(|cluster| cluster.followers.len())
        .sum();
    assert_eq!(followers, 1);
}

#[tokio::test]
async fn test_snapshot_roundtrip() {
    let mock_server = start_site().await;
    let mut engine = engine_for(&mock_server.uri());
    engine.build_index().await.expect("Crawl failed");

    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("state.db");

    let mut storage = SqliteStorage::new(&db_path).expect("Failed to open DB");
    engine.save(&mut storage).expect("Failed to save state");
    drop(storage);

    let storage = SqliteStorage::new(&db_path).expect("Failed to reopen DB");
    let mut restored = engine_for(&mock_server.uri());
    restored.restore(&storage).expect("Failed to restore state");

    assert_eq!(restored.state(), engine.state());
    assert_eq!(restored.matrix(), engine.matrix());
    assert_eq!(
        restored.search("garden").expect("query should be valid"),
        engine.search("garden").expect("query should be valid")
    );
}
