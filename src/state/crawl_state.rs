use crate::state::documents::{DocumentStore, Fingerprint};
use std::collections::{HashMap, HashSet};

/// A successfully fetched URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedPage {
    pub url: String,
    pub title: String,
    pub fingerprint: Fingerprint,
}

/// Insertion-ordered list of URLs without repeats
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlList {
    urls: Vec<String>,
    seen: HashSet<String>,
}

impl UrlList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a URL if it is not already listed; returns true if appended
    pub fn push(&mut self, url: &str) -> bool {
        if !self.seen.insert(url.to_string()) {
            return false;
        }
        self.urls.push(url.to_string());
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for UrlList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = Self::new();
        for url in iter {
            list.push(url.as_ref());
        }
        list
    }
}

/// Everything one crawl pass produced
///
/// Created at crawl start, populated by the crawl engine, and frozen once the
/// crawl ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlState {
    /// Seed URL as configured, without a trailing slash
    pub seed_url: String,

    /// `scheme://host[:port]` of the seed
    pub domain_root: String,

    visited: Vec<VisitedPage>,
    visited_urls: HashSet<String>,

    /// In-scope-failing links, never fetched
    pub outgoing: UrlList,

    /// Links failing the syntax rule and URLs whose fetch failed
    pub broken: UrlList,

    /// Image resources
    pub graphic: UrlList,

    /// URLs skipped because robots.txt disallows their directory
    pub disallowed: UrlList,

    /// Successful fetches, duplicates included
    pub pages_crawled: usize,

    /// Unique text documents stored
    pub pages_indexed: usize,

    pub documents: DocumentStore,
}

impl CrawlState {
    pub fn new(seed_url: &str, domain_root: &str) -> Self {
        Self {
            seed_url: seed_url.to_string(),
            domain_root: domain_root.to_string(),
            ..Self::default()
        }
    }

    /// Records a successful fetch; a URL is only ever recorded once
    pub fn record_visit(&mut self, url: &str, title: &str, fingerprint: &str) {
        if !self.visited_urls.insert(url.to_string()) {
            return;
        }
        self.visited.push(VisitedPage {
            url: url.to_string(),
            title: title.to_string(),
            fingerprint: fingerprint.to_string(),
        });
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited_urls.contains(url)
    }

    /// Visited pages in fetch order
    pub fn visited(&self) -> &[VisitedPage] {
        &self.visited
    }

    /// Groups visited URLs that served identical content
    ///
    /// Groups appear in order of each fingerprint's first visit and every
    /// group has at least two URLs.
    pub fn duplicates(&self) -> Vec<Vec<String>> {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<String>> = HashMap::new();

        for page in &self.visited {
            let group = groups.entry(page.fingerprint.as_str()).or_insert_with(|| {
                order.push(page.fingerprint.as_str());
                Vec::new()
            });
            group.push(page.url.clone());
        }

        order
            .into_iter()
            .filter_map(|fp| groups.remove(fp))
            .filter(|urls| urls.len() > 1)
            .collect()
    }
}
