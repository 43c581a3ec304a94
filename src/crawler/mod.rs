//! Crawler module for bounded-domain crawling
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with error classification
//! - HTML parsing into title, visible text, and links
//! - The FIFO frontier and request pacing
//! - Overall crawl coordination and reporting

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod report;

pub use coordinator::CrawlEngine;
pub use fetcher::{build_http_client, fetch_url, FetchResult, MAX_REDIRECTS};
pub use frontier::{Frontier, RequestPacer};
pub use parser::{parse_page, ParsedPage};
pub use report::{CrawlReport, StopReason};
