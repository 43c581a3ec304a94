//! Crawl summary report

use crate::state::CrawlState;
use crate::url::relative_to_domain;
use std::fmt;
use std::time::Duration;

/// Why the crawl loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Nothing left to fetch
    FrontierExhausted,
    /// The indexed-page budget was reached
    PageLimitReached,
    /// The configured crawl deadline passed
    DeadlineExpired,
    /// The state was restored from a snapshot rather than crawled
    Restored,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::FrontierExhausted => "frontier exhausted",
            Self::PageLimitReached => "page limit reached",
            Self::DeadlineExpired => "crawl deadline expired",
            Self::Restored => "restored from snapshot",
        };
        write!(f, "{}", reason)
    }
}

/// Human-readable summary of a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    pub seed_url: String,
    pub pages_crawled: usize,
    pub pages_indexed: usize,
    pub visited: usize,
    pub outgoing: Vec<String>,
    pub broken: Vec<String>,
    pub graphic: Vec<String>,
    pub disallowed: Vec<String>,
    /// URL groups sharing one content fingerprint
    pub duplicates: Vec<Vec<String>>,
    pub stop_reason: StopReason,
    pub elapsed: Duration,
}

impl CrawlReport {
    /// Builds a report from crawl state
    ///
    /// In-domain URLs are shown relative to the domain root.
    pub fn from_state(state: &CrawlState, stop_reason: StopReason, elapsed: Duration) -> Self {
        let relative = |urls: &[String]| -> Vec<String> {
            urls.iter()
                .map(|url| relative_to_domain(url, &state.domain_root))
                .collect()
        };

        Self {
            seed_url: state.seed_url.clone(),
            pages_crawled: state.pages_crawled,
            pages_indexed: state.pages_indexed,
            visited: state.visited().len(),
            outgoing: state.outgoing.as_slice().to_vec(),
            broken: relative(state.broken.as_slice()),
            graphic: relative(state.graphic.as_slice()),
            disallowed: relative(state.disallowed.as_slice()),
            duplicates: state
                .duplicates()
                .iter()
                .map(|group| relative(group))
                .collect(),
            stop_reason,
            elapsed,
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, heading: &str, urls: &[String]) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{} ({}):", heading, urls.len())?;
    for url in urls {
        writeln!(f, "  +  {}", url)?;
    }
    Ok(())
}

impl fmt::Display for CrawlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Crawl of {} ({})", self.seed_url, self.stop_reason)?;
        writeln!(f, "Pages crawled: {}", self.pages_crawled)?;
        writeln!(f, "Pages indexed: {}", self.pages_indexed)?;
        writeln!(f, "Visited URLs: {}", self.visited)?;
        if !self.elapsed.is_zero() {
            writeln!(f, "Elapsed: {:.2}s", self.elapsed.as_secs_f64())?;
        }

        write_list(f, "Outgoing URLs", &self.outgoing)?;
        write_list(f, "Broken URLs", &self.broken)?;
        write_list(f, "Graphic URLs", &self.graphic)?;
        write_list(f, "Disallowed URLs", &self.disallowed)?;

        writeln!(f)?;
        writeln!(f, "Duplicate URLs:")?;
        for (i, group) in self.duplicates.iter().enumerate() {
            writeln!(f, "\t +  Doc{}:", i + 1)?;
            for url in group {
                writeln!(f, "\t\t  +  {}", url)?;
            }
        }
        Ok(())
    }
}
