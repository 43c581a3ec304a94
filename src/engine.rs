//! Engine context
//!
//! Owns the output of every phase: the crawl engine and its state, the
//! frequency matrix, and the clusters derived from it. Ranking and
//! clustering read the frozen matrix; rebuilding the matrix discards the
//! clusters.

use crate::cluster::{cluster_documents, Clusters};
use crate::config::Config;
use crate::crawler::{CrawlEngine, CrawlReport, StopReason};
use crate::index::{build_frequency_matrix, FrequencyMatrix, TermStat};
use crate::ranking::{validate_query, Ranker, SearchResult};
use crate::state::CrawlState;
use crate::storage::{SnapshotMeta, Storage};
use crate::text::{EnglishStemmer, Stemmer, StopWords, Thesaurus};
use crate::url::{seed_scope, seed_start_url};
use crate::{QuarryError, Result};
use std::path::Path;
use std::time::Duration;

/// Crawl, index, rank and cluster one domain
pub struct Engine {
    config: Config,
    config_hash: String,
    crawler: CrawlEngine,
    thesaurus: Thesaurus,
    stemmer: Box<dyn Stemmer>,
    matrix: Option<FrequencyMatrix>,
    clusters: Option<Clusters>,
    report: Option<CrawlReport>,
    rng: fastrand::Rng,
}

impl Engine {
    /// Creates an engine, loading the stop-word list and thesaurus named in
    /// the configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    /// * `config_hash` - Hash of the configuration file, stored with snapshots
    ///
    /// # Returns
    ///
    /// * `Ok(Engine)` - Ready to build an index
    /// * `Err(QuarryError)` - A word list could not be loaded
    pub fn new(config: Config, config_hash: &str) -> Result<Self> {
        let stop_words = StopWords::load(Path::new(&config.input.stop_words_path))?;
        let thesaurus = Thesaurus::load(Path::new(&config.input.thesaurus_path))?;

        tracing::info!(
            "Loaded {} stop words and {} thesaurus entries",
            stop_words.len(),
            thesaurus.len()
        );

        Self::with_lexicon(config, config_hash, stop_words, thesaurus)
    }

    /// Creates an engine from already loaded word lists
    pub fn with_lexicon(
        config: Config,
        config_hash: &str,
        stop_words: StopWords,
        thesaurus: Thesaurus,
    ) -> Result<Self> {
        let crawler = CrawlEngine::new(&config, stop_words)?;
        let rng = match config.search.cluster_seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        Ok(Self {
            config,
            config_hash: config_hash.to_string(),
            crawler,
            thesaurus,
            stemmer: Box::new(EnglishStemmer::new()),
            matrix: None,
            clusters: None,
            report: None,
            rng,
        })
    }

    /// Crawls the configured seed, then builds the matrix and clusters
    pub async fn build_index(&mut self) -> Result<&CrawlReport> {
        let report = self
            .crawler
            .crawl(&self.config.crawler.seed_url, self.config.crawler.page_limit)
            .await?;
        self.report = Some(report);

        self.build_matrix();
        self.cluster()?;

        self.report.as_ref().ok_or(QuarryError::IndexNotBuilt)
    }

    /// Rebuilds the frequency matrix from the current documents
    ///
    /// Any existing clusters are discarded.
    pub fn build_matrix(&mut self) -> &FrequencyMatrix {
        let matrix = build_frequency_matrix(&self.crawler.state().documents, self.stemmer.as_ref());
        tracing::info!(
            "Built frequency matrix: {} terms x {} documents",
            matrix.term_count(),
            matrix.doc_count()
        );

        self.clusters = None;
        &*self.matrix.insert(matrix)
    }

    /// Clusters the documents of the current matrix around the configured
    /// number of leaders
    pub fn cluster(&mut self) -> Result<&Clusters> {
        let matrix = self.matrix.as_ref().ok_or(QuarryError::IndexNotBuilt)?;
        let clusters = cluster_documents(matrix, self.config.search.leaders, &mut self.rng);
        tracing::info!("Clustered documents around {} leaders", clusters.len());
        Ok(&*self.clusters.insert(clusters))
    }

    /// Validates and ranks a free-text query
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SearchResult>)` - Up to `results` documents, best first
    /// * `Err(QuarryError::Query)` - A query token failed validation
    /// * `Err(QuarryError::IndexNotBuilt)` - No matrix yet
    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        validate_query(query)?;
        let matrix = self.matrix.as_ref().ok_or(QuarryError::IndexNotBuilt)?;
        let state = self.crawler.state();

        let ranker = Ranker {
            documents: &state.documents,
            matrix,
            stop_words: self.crawler.stop_words(),
            thesaurus: &self.thesaurus,
            stemmer: self.stemmer.as_ref(),
            domain_root: &state.domain_root,
        };

        Ok(ranker.process_query(query, self.config.search.results))
    }

    /// Writes a snapshot of the crawl state and matrix
    pub fn save(&self, storage: &mut impl Storage) -> Result<()> {
        let matrix = self.matrix.as_ref().ok_or(QuarryError::IndexNotBuilt)?;
        storage.save_state(
            &SnapshotMeta::now(&self.config_hash),
            self.crawler.state(),
            matrix,
        )?;
        tracing::info!("Saved engine state");
        Ok(())
    }

    /// Replaces the engine state with a stored snapshot and reclusters
    ///
    /// A snapshot taken for a different seed or configuration is still
    /// loaded, with a warning.
    pub fn restore(&mut self, storage: &impl Storage) -> Result<&CrawlReport> {
        let snapshot = storage.load_state()?.ok_or(QuarryError::NoSnapshot)?;

        let configured_seed = seed_start_url(&self.config.crawler.seed_url)
            .map(|start| seed_scope(&start))
            .unwrap_or_else(|_| self.config.crawler.seed_url.clone());
        if snapshot.crawl.seed_url != configured_seed {
            tracing::warn!(
                "Snapshot was crawled from {} but the configured seed is {}",
                snapshot.crawl.seed_url,
                configured_seed
            );
        }
        if snapshot.meta.config_hash != self.config_hash {
            tracing::warn!(
                "Snapshot from {} was produced with a different configuration",
                snapshot.meta.saved_at.to_rfc3339()
            );
        }

        self.report = Some(CrawlReport::from_state(
            &snapshot.crawl,
            StopReason::Restored,
            Duration::ZERO,
        ));
        self.crawler.restore_state(snapshot.crawl);
        self.matrix = Some(snapshot.matrix);
        self.clusters = None;
        self.cluster()?;

        tracing::info!(
            "Restored {} documents from snapshot",
            self.crawler.state().documents.len()
        );
        self.report.as_ref().ok_or(QuarryError::NoSnapshot)
    }

    /// Writes the frequency matrix as CSV
    pub fn export_matrix_csv(&self, path: &Path) -> Result<()> {
        let matrix = self.matrix.as_ref().ok_or(QuarryError::IndexNotBuilt)?;
        std::fs::write(path, matrix.to_csv())?;
        tracing::info!("Exported frequency matrix to {}", path.display());
        Ok(())
    }

    /// The `n` most frequent terms of the index
    pub fn most_common_terms(&self, n: usize) -> Result<Vec<TermStat>> {
        let matrix = self.matrix.as_ref().ok_or(QuarryError::IndexNotBuilt)?;
        Ok(matrix.most_common(n))
    }

    pub fn report(&self) -> Option<&CrawlReport> {
        self.report.as_ref()
    }

    pub fn clusters(&self) -> Option<&Clusters> {
        self.clusters.as_ref()
    }

    pub fn matrix(&self) -> Option<&FrequencyMatrix> {
        self.matrix.as_ref()
    }

    pub fn state(&self) -> &CrawlState {
        self.crawler.state()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
