use serde::Deserialize;

/// Main configuration structure for Quarry
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// URL the crawl starts from; also defines the crawl scope
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum number of documents to index
    #[serde(rename = "page-limit")]
    pub page_limit: usize,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Overall crawl deadline (seconds)
    #[serde(rename = "crawl-deadline", default)]
    pub crawl_deadline: Option<u64>,

    /// Delay between consecutive requests (milliseconds)
    #[serde(rename = "request-delay", default)]
    pub request_delay: u64,
}

fn default_request_timeout() -> u64 {
    30
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Word list inputs
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Newline-separated stop-word list
    #[serde(rename = "stop-words-path")]
    pub stop_words_path: String,

    /// Comma-separated thesaurus (`word, synonym, synonym, ...`)
    #[serde(rename = "thesaurus-path")]
    pub thesaurus_path: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite engine snapshot
    #[serde(rename = "state-path")]
    pub state_path: String,

    /// Path to the exported frequency matrix CSV
    #[serde(rename = "matrix-path")]
    pub matrix_path: String,
}

/// Query and clustering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Number of results returned per query
    #[serde(default = "default_results")]
    pub results: usize,

    /// Number of cluster leaders
    #[serde(default = "default_leaders")]
    pub leaders: usize,

    /// Seed for leader sampling; random when absent
    #[serde(rename = "cluster-seed", default)]
    pub cluster_seed: Option<u64>,
}

fn default_results() -> usize {
    6
}

fn default_leaders() -> usize {
    5
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            results: default_results(),
            leaders: default_leaders(),
            cluster_seed: None,
        }
    }
}
