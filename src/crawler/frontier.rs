//! Crawl frontier and request pacing
//!
//! This module handles:
//! - The FIFO queue of URLs waiting to be fetched
//! - Remembering every URL ever enqueued so none is fetched twice
//! - Honouring the minimum delay between consecutive requests

use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tokio::time::Instant;

/// FIFO queue of URLs to crawl
///
/// A URL enters the frontier at most once over the whole crawl, even after it
/// has been dequeued. Dequeue order is insertion order, which makes the crawl
/// strictly breadth-first.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
    seen: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a URL unless it was enqueued before
    ///
    /// # Returns
    ///
    /// * `true` - The URL was added to the back of the queue
    /// * `false` - The URL has already been enqueued at some point
    pub fn enqueue(&mut self, url: &str) -> bool {
        if !self.seen.insert(url.to_string()) {
            return false;
        }
        self.queue.push_back(url.to_string());
        true
    }

    /// Takes the oldest queued URL
    pub fn next_url(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Spaces consecutive requests by a fixed minimum delay
#[derive(Debug)]
pub struct RequestPacer {
    delay: Duration,
    last_request: Option<Instant>,
}

impl RequestPacer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_request: None,
        }
    }

    /// Waits until the minimum delay since the previous request has passed
    pub async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let ready_at = last + self.delay;
            if ready_at > Instant::now() {
                tracing::trace!("Pacing next request by {:?}", ready_at - Instant::now());
                tokio::time::sleep_until(ready_at).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}
