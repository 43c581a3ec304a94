//! Quarry: a bounded-domain crawler and vector-space search engine
//!
//! This crate crawls a single web domain breadth-first, builds a term-document
//! frequency matrix from the pages it indexes, and answers free-text queries by
//! ranking documents with TF-IDF weighted cosine similarity.

pub mod cluster;
pub mod config;
pub mod crawler;
pub mod engine;
pub mod index;
pub mod ranking;
pub mod robots;
pub mod state;
pub mod storage;
pub mod text;
pub mod url;

use thiserror::Error;

/// Main error type for Quarry operations
#[derive(Debug, Error)]
pub enum QuarryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Index has not been built yet")]
    IndexNotBuilt,

    #[error("No saved engine state found")]
    NoSnapshot,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
///
/// Any of these aborts the run before crawling starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Failed to load {path}: {message}")]
    Lexicon { path: String, message: String },
}

/// Errors raised when a query is rejected before ranking
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid query token: '{0}'")]
    InvalidToken(String),
}

/// Result type alias for Quarry operations
pub type Result<T> = std::result::Result<T, QuarryError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use engine::Engine;
pub use index::FrequencyMatrix;
pub use ranking::SearchResult;
pub use state::{CrawlState, DocumentStore, PageOutcome};
