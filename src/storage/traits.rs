//! Storage traits and error types
//!
//! This module defines the trait interface for snapshot backends and
//! associated error types.

use crate::index::{FrequencyMatrix, MatrixShapeError};
use crate::state::CrawlState;
use crate::storage::{EngineState, SnapshotMeta};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),

    #[error("Snapshot schema version {found} is not supported (expected {expected})")]
    SchemaVersion { found: u32, expected: u32 },

    #[error("Invalid stored matrix: {0}")]
    Matrix(#[from] MatrixShapeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for engine snapshot backends
///
/// A snapshot holds the crawl state, the document store and the frequency
/// matrix. Loading a saved snapshot must reproduce them exactly.
pub trait Storage {
    /// Replaces any stored snapshot with the given state
    ///
    /// # Arguments
    ///
    /// * `meta` - Seed, configuration hash and timestamp of the snapshot
    /// * `crawl` - Crawl results including the document store
    /// * `matrix` - Frequency matrix built from `crawl.documents`
    fn save_state(
        &mut self,
        meta: &SnapshotMeta,
        crawl: &CrawlState,
        matrix: &FrequencyMatrix,
    ) -> StorageResult<()>;

    /// Loads the stored snapshot
    ///
    /// # Returns
    ///
    /// * `Ok(Some(EngineState))` - A snapshot was stored
    /// * `Ok(None)` - The database holds no snapshot
    fn load_state(&self) -> StorageResult<Option<EngineState>>;
}
