//! Configuration module for Quarry
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use quarry::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("quarry.toml")).unwrap();
//! println!("Crawling {} pages from {}", config.crawler.page_limit, config.crawler.seed_url);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    Config, CrawlerConfig, InputConfig, OutputConfig, SearchConfig, UserAgentConfig,
};
pub use validation::MIN_PAGE_LIMIT;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
