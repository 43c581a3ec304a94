//! Integration tests for quarry
//!
//! These tests run the crawler and the search engine against wiremock
//! servers standing in for a real web domain.

mod crawl_tests;
mod search_tests;

use quarry::config::{
    Config, CrawlerConfig, InputConfig, OutputConfig, SearchConfig, UserAgentConfig,
};

/// Creates a test configuration crawling the given seed
pub fn create_test_config(seed_url: &str, page_limit: usize) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed_url: seed_url.to_string(),
            page_limit,
            request_timeout: 5,
            crawl_deadline: None,
            request_delay: 0,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        input: InputConfig {
            stop_words_path: "./stopwords.txt".to_string(),
            thesaurus_path: "./thesaurus.csv".to_string(),
        },
        output: OutputConfig {
            state_path: "./test_state.db".to_string(),
            matrix_path: "./test_matrix.csv".to_string(),
        },
        search: SearchConfig {
            results: 6,
            leaders: 2,
            cluster_seed: Some(7),
        },
    }
}

/// Wraps a body in a minimal HTML page
pub fn html_page(title: &str, body: &str) -> String {
    format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, body
    )
}
