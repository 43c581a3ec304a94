//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use crate::{create_test_config, html_page};
use quarry::crawler::{CrawlEngine, StopReason};
use quarry::text::StopWords;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

fn crawl_engine(seed_url: &str, page_limit: usize) -> CrawlEngine {
    let config = create_test_config(seed_url, page_limit);
    CrawlEngine::new(&config, StopWords::from_words(["the", "a"]))
        .expect("Failed to create crawl engine")
}

#[tokio::test]
async fn test_linear_chain_stops_at_page_limit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page("Root", r#"<p>root words</p><a href="level1.html">next</a>"#),
    )
    .await;
    mount_page(
        &mock_server,
        "/level1.html",
        html_page("Level 1", r#"<p>first level</p><a href="level2.html">next</a>"#),
    )
    .await;

    // Queued but never fetched once two documents are indexed
    Mock::given(method("GET"))
        .and(path("/level2.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("Level 2", "deep")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut engine = crawl_engine(&base_url, 2);
    let report = engine.crawl(&base_url, 2).await.expect("Crawl failed");

    assert_eq!(report.stop_reason, StopReason::PageLimitReached);
    assert_eq!(report.pages_indexed, 2);
    assert_eq!(report.pages_crawled, 2);

    let visited: Vec<&str> = engine
        .state()
        .visited()
        .iter()
        .map(|page| page.url.as_str())
        .collect();
    assert_eq!(
        visited,
        vec![
            format!("{}/", base_url).as_str(),
            format!("{}/level1.html", base_url).as_str()
        ]
    );
    assert_eq!(engine.state().documents.len(), 2);
}

#[tokio::test]
async fn test_robots_txt_respect() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private/"),
        )
        .mount(&mock_server)
        .await;

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            r#"<a href="public.html">open</a><a href="private/secret.html">hidden</a>"#,
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/public.html",
        html_page("Public", "<p>public content</p>"),
    )
    .await;

    // Wiremock verifies expect(0) when the mock server drops
    Mock::given(method("GET"))
        .and(path("/private/secret.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("Secret", "secret")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut engine = crawl_engine(&base_url, 10);
    let report = engine.crawl(&base_url, 10).await.expect("Crawl failed");

    assert_eq!(report.stop_reason, StopReason::FrontierExhausted);
    assert_eq!(report.pages_indexed, 2);
    assert_eq!(report.disallowed, vec!["/private/secret.html"]);
    assert!(report.broken.is_empty());
    assert!(engine.robots().disallowed().any(|rule| rule == "/private/"));
}

#[tokio::test]
async fn test_duplicate_content_is_indexed_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            r#"<a href="a.html">first</a><a href="b.html">second</a>"#,
        ),
    )
    .await;
    let copy = html_page("Copy", "<p>identical words here</p>");
    mount_page(&mock_server, "/a.html", copy.clone()).await;
    mount_page(&mock_server, "/b.html", copy).await;

    let mut engine = crawl_engine(&base_url, 10);
    let report = engine.crawl(&base_url, 10).await.expect("Crawl failed");

    assert_eq!(report.pages_crawled, 3);
    assert_eq!(report.pages_indexed, 2);
    assert_eq!(engine.state().documents.len(), 2);
    assert_eq!(
        report.duplicates,
        vec![vec!["/a.html".to_string(), "/b.html".to_string()]]
    );

    let canonical = engine
        .state()
        .documents
        .iter()
        .find(|doc| doc.title == "Copy")
        .expect("copy should be indexed");
    assert_eq!(canonical.url, format!("{}/a.html", base_url));
}

#[tokio::test]
async fn test_broken_graphic_and_outgoing_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page(
            "Home",
            r#"<a href="missing.html">gone</a>
               <a href="logo.png">logo</a>
               <a href="report.pdf">paper</a>
               <a href="mailto:someone@example.com">mail</a>
               <a href="http://other.example.org/">elsewhere</a>"#,
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47])
                .insert_header("content-type", "image/png"),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"%PDF-1.4".to_vec())
                .insert_header("content-type", "application/pdf"),
        )
        .mount(&mock_server)
        .await;

    let mut engine = crawl_engine(&base_url, 10);
    let report = engine.crawl(&base_url, 10).await.expect("Crawl failed");

    assert_eq!(report.pages_indexed, 1);
    assert_eq!(report.pages_crawled, 3);
    assert_eq!(report.graphic, vec!["/logo.png"]);
    assert_eq!(report.outgoing, vec!["http://other.example.org/"]);
    assert!(report.broken.contains(&"/missing.html".to_string()));
    assert!(report
        .broken
        .contains(&"mailto:someone@example.com".to_string()));
    assert!(engine
        .state()
        .is_visited(&format!("{}/report.pdf", base_url)));

    let printed = report.to_string();
    assert!(printed.contains("Graphic URLs (1):"));
    assert!(printed.contains("  +  /logo.png"));
}

#[tokio::test]
async fn test_expired_deadline_stops_before_fetching() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("Home", "words")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url, 10);
    config.crawler.crawl_deadline = Some(0);
    let mut engine =
        CrawlEngine::new(&config, StopWords::default()).expect("Failed to create crawl engine");

    let report = engine.crawl(&base_url, 10).await.expect("Crawl failed");
    assert_eq!(report.stop_reason, StopReason::DeadlineExpired);
    assert_eq!(report.pages_crawled, 0);
}

#[tokio::test]
async fn test_links_resolve_against_redirect_target() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page("Home", r#"<a href="old/">moved section</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/old/"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new/page.html"))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/new/page.html",
        html_page("Moved", r#"<p>moved content</p><a href="next.html">onward</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/new/next.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("Next", "onward words")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut engine = crawl_engine(&base_url, 10);
    let report = engine.crawl(&base_url, 10).await.expect("Crawl failed");

    assert_eq!(report.pages_indexed, 3);
    assert!(report.broken.is_empty());
    assert!(engine
        .state()
        .is_visited(&format!("{}/new/next.html", base_url)));
}

#[tokio::test]
async fn test_seed_is_compared_in_serialized_form() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        html_page("Home", r#"<a href="about.html">about</a>"#),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/about.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page("About", "about us")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let seed = base_url.replacen("http://", "HTTP://", 1);
    let mut engine = crawl_engine(&seed, 10);
    let report = engine.crawl(&seed, 10).await.expect("Crawl failed");

    assert_eq!(report.seed_url, base_url);
    assert_eq!(report.pages_indexed, 2);
    assert!(report.outgoing.is_empty());
}
