//! State module for crawl results
//!
//! This module holds everything a crawl pass produces.
//!
//! # Components
//!
//! - `CrawlState`: URL lists, counters, and visited pages for one crawl
//! - `DocumentStore`: Unique documents keyed by content fingerprint
//! - `PageOutcome`: How a single dequeued URL was handled

mod crawl_state;
mod documents;
mod page_state;

// Re-export main types
pub use crawl_state::{CrawlState, UrlList, VisitedPage};
pub use documents::{fingerprint, Document, DocumentStore, Fingerprint};
pub use page_state::PageOutcome;
