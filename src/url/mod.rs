//! URL handling module for Quarry
//!
//! This module provides the URL policy used by the crawler: syntax
//! validation, scope classification, link resolution, and resource-type
//! classification.

mod resolve;
mod validate;

pub use resolve::{
    directory_prefix, domain_root, last_segment, relative_to_domain, resolve_link, seed_scope,
    seed_start_url,
};
pub use validate::url_is_valid;

use url::Url;

/// Where a discovered link points relative to the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Inside the crawled domain - may be fetched
    Internal,
    /// Outside the crawled domain - recorded, never fetched
    External,
}

/// Classifies a URL against the seed
///
/// A URL is in scope when the seed URL string is a substring of it. This is
/// deliberately looser than same-origin matching.
///
/// # Examples
///
/// ```
/// use quarry::url::{classify_scope, Scope};
///
/// let seed = "http://lyle.smu.edu/~fmoore";
/// assert_eq!(classify_scope(seed, "http://lyle.smu.edu/~fmoore/a.htm"), Scope::Internal);
/// assert_eq!(classify_scope(seed, "http://lyle.smu.edu/other/"), Scope::External);
/// ```
pub fn classify_scope(seed_url: &str, url: &str) -> Scope {
    if url.contains(seed_url) {
        Scope::Internal
    } else {
        Scope::External
    }
}

/// What kind of resource a URL path points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Page, markup or plain text - indexed and scanned for links
    Text,
    /// Image - recorded as a graphic, never indexed
    Graphic,
    /// Anything else (pdf, archives, ...) - visited only
    Other,
}

const TEXT_SUFFIXES: &[&str] = &[".html", ".htm", ".php", ".txt"];
const GRAPHIC_SUFFIXES: &[&str] = &[".gif", ".png", ".jpeg", ".jpg"];

/// Classifies a URL by the suffix of its path
///
/// Paths ending in `/`, extensionless last segments, and page/markup/text
/// suffixes are text; image suffixes are graphics.
pub fn classify_resource(url: &Url) -> ResourceKind {
    let path = url.path().to_lowercase();

    if GRAPHIC_SUFFIXES.iter().any(|ext| path.ends_with(ext)) {
        return ResourceKind::Graphic;
    }

    if path.ends_with('/') || TEXT_SUFFIXES.iter().any(|ext| path.ends_with(ext)) {
        return ResourceKind::Text;
    }

    let last = path.rsplit('/').next().unwrap_or("");
    if !last.contains('.') {
        return ResourceKind::Text;
    }

    ResourceKind::Other
}
