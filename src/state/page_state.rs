/// Outcome definitions for a single processed URL
use std::fmt;

/// How the crawl engine disposed of one dequeued URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    // ===== Successful Fetches =====
    /// Text page whose content was stored as a new document
    Indexed,

    /// Text page whose content matched an already stored document
    Duplicate,

    /// Image resource, listed but not parsed
    Graphic,

    /// Fetched resource that is neither text nor graphic
    Unindexed,

    // ===== Failures and Skips =====
    /// HTTP error, network error, or timeout
    Broken,

    /// robots.txt disallows the URL's directory
    Disallowed,
}

impl PageOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indexed => "indexed",
            Self::Duplicate => "duplicate",
            Self::Graphic => "graphic",
            Self::Unindexed => "unindexed",
            Self::Broken => "broken",
            Self::Disallowed => "disallowed",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
