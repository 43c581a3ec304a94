//! Robots.txt handling module
//!
//! This module fetches and parses the crawled domain's robots.txt once per
//! crawl. Any failure to retrieve it means no restrictions.

mod parser;

pub use parser::{RobotsPolicy, RobotsRule};

use reqwest::{Client, StatusCode};

/// Fetches robots.txt for a domain
///
/// A 404 is logged at info level; any other failure is logged as a warning.
/// Both fall back to [`RobotsPolicy::allow_all`].
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `domain_root` - `scheme://host[:port]` of the crawled domain
pub async fn fetch_robots(client: &Client, domain_root: &str) -> RobotsPolicy {
    let robots_url = format!("{}/robots.txt", domain_root.trim_end_matches('/'));

    let response = match client.get(&robots_url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!(
                "Could not fetch {}: {}. Proceeding with no restrictions",
                robots_url,
                e
            );
            return RobotsPolicy::allow_all();
        }
    };

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        tracing::info!("No robots.txt found. Proceeding with no restrictions");
        return RobotsPolicy::allow_all();
    }
    if !status.is_success() {
        tracing::warn!(
            "Could not fetch robots.txt (HTTP {}). Proceeding with no restrictions",
            status.as_u16()
        );
        return RobotsPolicy::allow_all();
    }

    match response.text().await {
        Ok(body) => RobotsPolicy::from_content(&body),
        Err(e) => {
            tracing::warn!(
                "Error reading robots.txt: {}. Proceeding with no restrictions",
                e
            );
            RobotsPolicy::allow_all()
        }
    }
}
