//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests returning raw page bytes
//! - Error classification

use crate::config::UserAgentConfig;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Maximum redirect hops followed for a single request
pub const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
///
/// Every failure variant is recorded as a broken URL by the crawl engine;
/// none of them stops the crawl.
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the resource
    Success {
        /// URL the response came from after any redirects
        final_url: String,
        /// Raw response body
        body: Vec<u8>,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use quarry::config::UserAgentConfig;
/// use quarry::crawler::build_http_client;
/// use std::time::Duration;
///
/// let config = UserAgentConfig {
///     crawler_name: "Quarry".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config, Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx | Success with raw body and post-redirect URL |
/// | Any other status | HttpError |
/// | Timeout | NetworkError |
/// | Connection refused | NetworkError |
/// | Body read failure | NetworkError |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    match response.bytes().await {
        Ok(body) => FetchResult::Success {
            final_url,
            body: body.to_vec(),
        },
        Err(e) => classify_error(&e),
    }
}

fn classify_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else if e.is_redirect() {
        "Too many redirects".to_string()
    } else {
        e.to_string()
    };
    FetchResult::NetworkError { error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_config() -> UserAgentConfig {
        UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/about".to_string(),
            contact_email: "admin@example.com".to_string(),
        }
    }

    fn client() -> Client {
        build_http_client(&create_test_config(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        let config = create_test_config();
        assert!(build_http_client(&config, Duration::from_secs(1)).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_success_returns_raw_bytes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page.html"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_bytes(b"<html>hi</html>".to_vec()),
            )
            .mount(&server)
            .await;

        let url = format!("{}/page.html", server.uri());
        match fetch_url(&client(), &url).await {
            FetchResult::Success { final_url, body } => {
                assert_eq!(body, b"<html>hi</html>");
                assert_eq!(final_url, url);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_reports_redirect_target() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old/"))
            .respond_with(ResponseTemplate::new(301).insert_header("location", "/new/page.html"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new/page.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved"))
            .mount(&server)
            .await;

        match fetch_url(&client(), &format!("{}/old/", server.uri())).await {
            FetchResult::Success { final_url, body } => {
                assert_eq!(final_url, format!("{}/new/page.html", server.uri()));
                assert_eq!(body, b"moved");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = fetch_url(&client(), &format!("{}/missing", server.uri())).await;
        assert!(matches!(
            result,
            FetchResult::HttpError { status_code: 404 }
        ));
    }

    #[tokio::test]
    async fn test_fetch_timeout_is_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let client = build_http_client(&create_test_config(), Duration::from_millis(200)).unwrap();
        let result = fetch_url(&client, &format!("{}/slow", server.uri())).await;
        assert!(matches!(result, FetchResult::NetworkError { .. }));
    }
}
