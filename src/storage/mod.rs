//! Storage module for persisting engine state
//!
//! This module handles all database operations for the engine, including:
//! - SQLite database initialization and schema management
//! - Saving a snapshot of documents, crawl lists and the frequency matrix
//! - Restoring that snapshot exactly on import

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStorage;
pub use traits::{Storage, StorageError, StorageResult};

use crate::index::FrequencyMatrix;
use crate::state::CrawlState;
use chrono::{DateTime, Utc};
use std::path::Path;

/// Opens or creates a snapshot database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
pub fn open_storage(path: &Path) -> crate::Result<SqliteStorage> {
    SqliteStorage::new(path)
}

/// Header stored with every snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotMeta {
    /// SHA-256 of the configuration file that produced the snapshot
    pub config_hash: String,
    pub saved_at: DateTime<Utc>,
}

impl SnapshotMeta {
    /// Header for a snapshot taken now
    pub fn now(config_hash: &str) -> Self {
        Self {
            config_hash: config_hash.to_string(),
            saved_at: Utc::now(),
        }
    }
}

/// Everything restored from a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    pub meta: SnapshotMeta,
    pub crawl: CrawlState,
    pub matrix: FrequencyMatrix,
}

/// Names of the persisted URL lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlListKind {
    Outgoing,
    Broken,
    Graphic,
    Disallowed,
}

impl UrlListKind {
    pub const ALL: [UrlListKind; 4] = [
        UrlListKind::Outgoing,
        UrlListKind::Broken,
        UrlListKind::Graphic,
        UrlListKind::Disallowed,
    ];

    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Outgoing => "outgoing",
            Self::Broken => "broken",
            Self::Graphic => "graphic",
            Self::Disallowed => "disallowed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "outgoing" => Some(Self::Outgoing),
            "broken" => Some(Self::Broken),
            "graphic" => Some(Self::Graphic),
            "disallowed" => Some(Self::Disallowed),
            _ => None,
        }
    }
}
