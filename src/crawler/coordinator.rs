//! Crawl engine - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop that coordinates:
//! - Loading the robots policy once per crawl
//! - Managing the frontier queue
//! - Fetching, fingerprinting, and classifying each resource
//! - Term extraction and first-wins document storage
//! - Link resolution and scope decisions

use crate::config::{Config, MIN_PAGE_LIMIT};
use crate::crawler::frontier::{Frontier, RequestPacer};
use crate::crawler::parser::parse_page;
use crate::crawler::report::{CrawlReport, StopReason};
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::robots::{fetch_robots, RobotsPolicy};
use crate::state::{fingerprint, CrawlState, Document, PageOutcome};
use crate::text::{extract_terms, StopWords};
use crate::url::{
    classify_resource, classify_scope, directory_prefix, domain_root, last_segment,
    relative_to_domain, resolve_link, seed_scope, seed_start_url, url_is_valid, ResourceKind,
    Scope,
};
use crate::{ConfigError, Result};
use reqwest::Client;
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

/// Single-owner crawler for one bounded domain
pub struct CrawlEngine {
    client: Client,
    stop_words: StopWords,
    request_delay: Duration,
    crawl_deadline: Option<Duration>,
    robots: RobotsPolicy,
    frontier: Frontier,
    state: CrawlState,
}

impl CrawlEngine {
    /// Creates a new crawl engine
    ///
    /// # Arguments
    ///
    /// * `config` - The application configuration
    /// * `stop_words` - Words dropped from page text
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlEngine)` - Ready to crawl
    /// * `Err(QuarryError)` - The HTTP client could not be built
    pub fn new(config: &Config, stop_words: StopWords) -> Result<Self> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.crawler.request_timeout),
        )?;

        Ok(Self {
            client,
            stop_words,
            request_delay: Duration::from_millis(config.crawler.request_delay),
            crawl_deadline: config.crawler.crawl_deadline.map(Duration::from_secs),
            robots: RobotsPolicy::allow_all(),
            frontier: Frontier::new(),
            state: CrawlState::default(),
        })
    }

    /// Crawls the seed's domain breadth-first
    ///
    /// The seed is enqueued first as `<seed>/`. The loop stops when the
    /// frontier is empty, when `page_limit` unique documents have been
    /// indexed, or when the crawl deadline passes. Fetch failures are recorded
    /// and never abort the crawl.
    ///
    /// # Arguments
    ///
    /// * `seed_url` - Starting URL; also the scope every link is tested against
    /// * `page_limit` - Maximum number of documents to index
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - Summary of the finished crawl
    /// * `Err(QuarryError)` - Invalid seed or page limit
    pub async fn crawl(&mut self, seed_url: &str, page_limit: usize) -> Result<CrawlReport> {
        if page_limit < MIN_PAGE_LIMIT {
            return Err(ConfigError::Validation(format!(
                "page_limit must be >= {}, got {}",
                MIN_PAGE_LIMIT, page_limit
            ))
            .into());
        }

        if !url_is_valid(seed_url.trim_end_matches('/')) {
            return Err(ConfigError::InvalidUrl(format!("Invalid seed-url '{}'", seed_url)).into());
        }
        let start_url = seed_start_url(seed_url)?;
        let seed = seed_scope(&start_url);
        let root = domain_root(&start_url);

        self.state = CrawlState::new(&seed, &root);
        self.frontier = Frontier::new();
        self.robots = fetch_robots(&self.client, &root).await;

        tracing::info!(
            "robots.txt: Disallowed {:?} Allowed {:?}",
            self.robots.disallowed().collect::<Vec<_>>(),
            self.robots.allowed().collect::<Vec<_>>()
        );

        let mut pacer = RequestPacer::new(self.request_delay);
        let start_time = Instant::now();
        self.frontier.enqueue(start_url.as_str());

        tracing::info!("Starting crawl of {} (page limit {})", seed, page_limit);

        let stop_reason = loop {
            if self.state.pages_indexed >= page_limit {
                break StopReason::PageLimitReached;
            }

            if let Some(deadline) = self.crawl_deadline {
                if start_time.elapsed() >= deadline {
                    tracing::warn!(
                        "Crawl deadline of {:?} expired with {} URLs still queued",
                        deadline,
                        self.frontier.len()
                    );
                    break StopReason::DeadlineExpired;
                }
            }

            let Some(url) = self.frontier.next_url() else {
                break StopReason::FrontierExhausted;
            };

            let outcome = self.process_url(&url, &mut pacer).await;
            tracing::debug!("{} -> {}", url, outcome);
        };

        let elapsed = start_time.elapsed();
        tracing::info!(
            "Crawl completed ({}): {} pages crawled, {} indexed in {:?}",
            stop_reason,
            self.state.pages_crawled,
            self.state.pages_indexed,
            elapsed
        );

        Ok(CrawlReport::from_state(&self.state, stop_reason, elapsed))
    }

    /// Processes a single dequeued URL
    ///
    /// This method:
    /// 1. Checks the URL's directory against robots.txt
    /// 2. Fetches the resource
    /// 3. Records the visit and classifies the resource
    /// 4. Stores new documents and follows links of text pages
    async fn process_url(&mut self, url: &str, pacer: &mut RequestPacer) -> PageOutcome {
        let parsed_url = match Url::parse(url) {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!("Unparseable queued URL {}: {}", url, e);
                self.state.broken.push(url);
                return PageOutcome::Broken;
            }
        };

        let directory = directory_prefix(&parsed_url);
        if !self.robots.is_allowed(directory.path()) {
            tracing::info!(
                "Not allowed: {}",
                relative_to_domain(url, &self.state.domain_root)
            );
            self.state.disallowed.push(url);
            return PageOutcome::Disallowed;
        }

        pacer.wait().await;

        let (final_url, body) = match fetch_url(&self.client, url).await {
            FetchResult::Success { final_url, body } => (final_url, body),
            FetchResult::HttpError { status_code } => {
                tracing::debug!("HTTP {} for {}", status_code, url);
                self.state.broken.push(url);
                return PageOutcome::Broken;
            }
            FetchResult::NetworkError { error } => {
                tracing::debug!("Network error for {}: {}", url, error);
                self.state.broken.push(url);
                return PageOutcome::Broken;
            }
        };

        let content_fingerprint = fingerprint(&body);
        let kind = classify_resource(&parsed_url);

        let page = match kind {
            ResourceKind::Text => Some(parse_page(&String::from_utf8_lossy(&body))),
            ResourceKind::Graphic | ResourceKind::Other => None,
        };
        let title = page
            .as_ref()
            .and_then(|p| p.title.clone())
            .unwrap_or_else(|| last_segment(&parsed_url));

        self.state.record_visit(url, &title, &content_fingerprint);
        self.state.pages_crawled += 1;

        tracing::info!(
            "{}. Visiting: {} ({})",
            self.state.pages_crawled,
            relative_to_domain(url, &self.state.domain_root),
            title
        );

        match kind {
            ResourceKind::Graphic => {
                self.state.graphic.push(url);
                PageOutcome::Graphic
            }
            ResourceKind::Other => PageOutcome::Unindexed,
            ResourceKind::Text => {
                let Some(page) = page else {
                    return PageOutcome::Unindexed;
                };

                let document = Document {
                    fingerprint: content_fingerprint,
                    url: url.to_string(),
                    title,
                    terms: extract_terms(&page.text, &self.stop_words),
                };

                let outcome = if self.state.documents.insert(document) {
                    self.state.pages_indexed += 1;
                    PageOutcome::Indexed
                } else {
                    tracing::debug!("Duplicate content at {}", url);
                    PageOutcome::Duplicate
                };

                let base = match Url::parse(&final_url) {
                    Ok(landed) if landed.as_str() != url => {
                        tracing::debug!("{} redirected to {}", url, landed);
                        directory_prefix(&landed)
                    }
                    _ => directory,
                };
                self.handle_discovered_links(&base, &page.links);
                outcome
            }
        }
    }

    /// Handles links discovered on a text page
    ///
    /// Invalid links go to the broken list, out-of-scope links to the
    /// outgoing list, and new in-scope links to the back of the frontier.
    fn handle_discovered_links(&mut self, directory: &Url, links: &[String]) {
        for href in links {
            let Some(link) = resolve_link(directory, href) else {
                continue;
            };

            if !url_is_valid(&link) {
                tracing::debug!("Invalid link {}", link);
                self.state.broken.push(&link);
                continue;
            }

            match classify_scope(&self.state.seed_url, &link) {
                Scope::Internal => {
                    if !self.state.is_visited(&link) && self.frontier.enqueue(&link) {
                        tracing::debug!("Queued {}", link);
                    }
                }
                Scope::External => {
                    if self.state.outgoing.push(&link) {
                        tracing::debug!("Outgoing {}", link);
                    }
                }
            }
        }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Robots policy loaded by the last crawl
    pub fn robots(&self) -> &RobotsPolicy {
        &self.robots
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    /// Replaces the crawl state, e.g. with one restored from a snapshot
    pub fn restore_state(&mut self, state: CrawlState) {
        self.frontier = Frontier::new();
        self.state = state;
    }
}
