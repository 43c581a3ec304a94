//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::index::FrequencyMatrix;
use crate::state::{CrawlState, Document, UrlList};
use crate::storage::schema::{get_schema_version, initialize_schema, SNAPSHOT_TABLES};
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{EngineState, SnapshotMeta, UrlListKind};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(QuarryError)` - Failed to open database
    pub fn new(path: &Path) -> crate::Result<Self> {
        let conn = Connection::open(path).map_err(StorageError::from)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )
        .map_err(StorageError::from)?;

        initialize_schema(&conn).map_err(StorageError::from)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> crate::Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(StorageError::from)?;
        initialize_schema(&conn).map_err(StorageError::from)?;
        Ok(Self { conn })
    }
}

fn url_list(crawl: &CrawlState, kind: UrlListKind) -> &UrlList {
    match kind {
        UrlListKind::Outgoing => &crawl.outgoing,
        UrlListKind::Broken => &crawl.broken,
        UrlListKind::Graphic => &crawl.graphic,
        UrlListKind::Disallowed => &crawl.disallowed,
    }
}

fn url_list_mut(crawl: &mut CrawlState, kind: UrlListKind) -> &mut UrlList {
    match kind {
        UrlListKind::Outgoing => &mut crawl.outgoing,
        UrlListKind::Broken => &mut crawl.broken,
        UrlListKind::Graphic => &mut crawl.graphic,
        UrlListKind::Disallowed => &mut crawl.disallowed,
    }
}

struct MetaRow {
    schema_version: u32,
    seed_url: String,
    domain_root: String,
    config_hash: String,
    saved_at: String,
    pages_crawled: i64,
    pages_indexed: i64,
    doc_count: i64,
}

impl Storage for SqliteStorage {
    fn save_state(
        &mut self,
        meta: &SnapshotMeta,
        crawl: &CrawlState,
        matrix: &FrequencyMatrix,
    ) -> StorageResult<()> {
        let tx = self.conn.transaction()?;

        for table in SNAPSHOT_TABLES {
            tx.execute(&format!("DELETE FROM {}", table), [])?;
        }

        tx.execute(
            "INSERT INTO snapshot_meta (id, schema_version, seed_url, domain_root, config_hash,
                saved_at, pages_crawled, pages_indexed, doc_count)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                get_schema_version(),
                crawl.seed_url,
                crawl.domain_root,
                meta.config_hash,
                meta.saved_at.to_rfc3339(),
                crawl.pages_crawled as i64,
                crawl.pages_indexed as i64,
                matrix.doc_count() as i64,
            ],
        )?;

        {
            let mut stmt = tx.prepare(
                "INSERT INTO documents (position, fingerprint, url, title, terms)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (position, document) in crawl.documents.iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    document.fingerprint,
                    document.url,
                    document.title,
                    document.terms.join(" "),
                ])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO visited (position, url, title, fingerprint) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (position, page) in crawl.visited().iter().enumerate() {
                stmt.execute(params![position as i64, page.url, page.title, page.fingerprint])?;
            }

            let mut stmt =
                tx.prepare("INSERT INTO url_lists (list, position, url) VALUES (?1, ?2, ?3)")?;
            for kind in UrlListKind::ALL {
                for (position, url) in url_list(crawl, kind).as_slice().iter().enumerate() {
                    stmt.execute(params![kind.to_db_string(), position as i64, url])?;
                }
            }

            let mut stmt = tx.prepare("INSERT INTO vocabulary (position, term) VALUES (?1, ?2)")?;
            for (position, term) in matrix.vocabulary().iter().enumerate() {
                stmt.execute(params![position as i64, term])?;
            }

            let mut stmt = tx.prepare(
                "INSERT INTO matrix_cells (term_position, doc_position, count) VALUES (?1, ?2, ?3)",
            )?;
            for (term_position, row) in matrix.rows().iter().enumerate() {
                for (doc_position, &count) in row.iter().enumerate() {
                    if count > 0 {
                        stmt.execute(params![term_position as i64, doc_position as i64, count])?;
                    }
                }
            }
        }

        tx.commit()?;

        tracing::debug!(
            "Saved snapshot: {} documents, {} terms",
            crawl.documents.len(),
            matrix.term_count()
        );
        Ok(())
    }

    fn load_state(&self) -> StorageResult<Option<EngineState>> {
        let header = self
            .conn
            .query_row(
                "SELECT schema_version, seed_url, domain_root, config_hash, saved_at,
                        pages_crawled, pages_indexed, doc_count
                 FROM snapshot_meta WHERE id = 1",
                [],
                |row| {
                    Ok(MetaRow {
                        schema_version: row.get(0)?,
                        seed_url: row.get(1)?,
                        domain_root: row.get(2)?,
                        config_hash: row.get(3)?,
                        saved_at: row.get(4)?,
                        pages_crawled: row.get(5)?,
                        pages_indexed: row.get(6)?,
                        doc_count: row.get(7)?,
                    })
                },
            )
            .optional()?;

        let Some(header) = header else {
            return Ok(None);
        };

        if header.schema_version != get_schema_version() {
            return Err(StorageError::SchemaVersion {
                found: header.schema_version,
                expected: get_schema_version(),
            });
        }

        let saved_at = DateTime::parse_from_rfc3339(&header.saved_at)
            .map_err(|e| StorageError::Corrupt(format!("saved_at '{}': {}", header.saved_at, e)))?
            .with_timezone(&Utc);

        let mut crawl = CrawlState::new(&header.seed_url, &header.domain_root);
        crawl.pages_crawled = header.pages_crawled as usize;
        crawl.pages_indexed = header.pages_indexed as usize;

        let mut stmt = self.conn.prepare(
            "SELECT fingerprint, url, title, terms FROM documents ORDER BY position",
        )?;
        let documents = stmt
            .query_map([], |row| {
                let terms: String = row.get(3)?;
                Ok(Document {
                    fingerprint: row.get(0)?,
                    url: row.get(1)?,
                    title: row.get(2)?,
                    terms: terms.split_whitespace().map(str::to_string).collect(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        for document in documents {
            crawl.documents.insert(document);
        }

        let mut stmt = self
            .conn
            .prepare("SELECT url, title, fingerprint FROM visited ORDER BY position")?;
        let visited = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        for (url, title, fingerprint) in visited {
            crawl.record_visit(&url, &title, &fingerprint);
        }

        let mut stmt = self
            .conn
            .prepare("SELECT list, url FROM url_lists ORDER BY list, position")?;
        let entries = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        for (list, url) in entries {
            let kind = UrlListKind::from_db_string(&list)
                .ok_or_else(|| StorageError::Corrupt(format!("unknown URL list '{}'", list)))?;
            url_list_mut(&mut crawl, kind).push(&url);
        }

        let mut stmt = self
            .conn
            .prepare("SELECT term FROM vocabulary ORDER BY position")?;
        let terms = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let doc_count = header.doc_count as usize;
        let mut rows = vec![vec![0u32; doc_count]; terms.len()];

        let mut stmt = self
            .conn
            .prepare("SELECT term_position, doc_position, count FROM matrix_cells")?;
        let cells = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, u32>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;
        for (term_position, doc_position, count) in cells {
            let cell = rows
                .get_mut(term_position as usize)
                .and_then(|row| row.get_mut(doc_position as usize))
                .ok_or_else(|| {
                    StorageError::Corrupt(format!(
                        "matrix cell ({}, {}) is out of bounds",
                        term_position, doc_position
                    ))
                })?;
            *cell = count;
        }

        let matrix = FrequencyMatrix::from_rows(terms, rows, doc_count)?;

        tracing::debug!(
            "Loaded snapshot: {} documents, {} terms",
            crawl.documents.len(),
            matrix.term_count()
        );

        Ok(Some(EngineState {
            meta: SnapshotMeta {
                config_hash: header.config_hash,
                saved_at,
            },
            crawl,
            matrix,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build_frequency_matrix;
    use crate::text::EnglishStemmer;
    use tempfile::TempDir;

    fn sample_crawl() -> CrawlState {
        let mut crawl = CrawlState::new("http://a.com/site", "http://a.com");
        crawl.documents.insert(Document {
            fingerprint: "f1".to_string(),
            url: "http://a.com/site/".to_string(),
            title: "Home".to_string(),
            terms: vec!["garden".into(), "flowers".into(), "garden".into()],
        });
        crawl.documents.insert(Document {
            fingerprint: "f2".to_string(),
            url: "http://a.com/site/b.html".to_string(),
            title: "B".to_string(),
            terms: vec!["engine".into()],
        });
        crawl.record_visit("http://a.com/site/", "Home", "f1");
        crawl.record_visit("http://a.com/site/b.html", "B", "f2");
        crawl.record_visit("http://a.com/site/index.html", "Home", "f1");
        crawl.record_visit("http://a.com/site/logo.png", "logo.png", "f3");
        crawl.outgoing.push("http://other.org/");
        crawl.broken.push("http://a.com/site/missing.html");
        crawl.broken.push("mailto:someone@a.com");
        crawl.graphic.push("http://a.com/site/logo.png");
        crawl.disallowed.push("http://a.com/site/private/x.html");
        crawl.pages_crawled = 4;
        crawl.pages_indexed = 2;
        crawl
    }

    #[test]
    fn test_create_in_memory() {
        assert!(SqliteStorage::new_in_memory().is_ok());
    }

    #[test]
    fn test_empty_database_has_no_snapshot() {
        let storage = SqliteStorage::new_in_memory().unwrap();
        assert!(storage.load_state().unwrap().is_none());
    }

    #[test]
    fn test_snapshot_roundtrip_is_exact() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let crawl = sample_crawl();
        let matrix = build_frequency_matrix(&crawl.documents, &EnglishStemmer::new());
        let meta = SnapshotMeta::now("abc123");

        storage.save_state(&meta, &crawl, &matrix).unwrap();
        let loaded = storage.load_state().unwrap().unwrap();

        assert_eq!(loaded.meta, meta);
        assert_eq!(loaded.crawl, crawl);
        assert_eq!(loaded.matrix, matrix);
        assert_eq!(loaded.crawl.duplicates(), crawl.duplicates());
    }

    #[test]
    fn test_save_replaces_previous_snapshot() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let crawl = sample_crawl();
        let matrix = build_frequency_matrix(&crawl.documents, &EnglishStemmer::new());
        storage
            .save_state(&SnapshotMeta::now("first"), &crawl, &matrix)
            .unwrap();

        let smaller = CrawlState::new("http://b.com", "http://b.com");
        storage
            .save_state(&SnapshotMeta::now("second"), &smaller, &FrequencyMatrix::default())
            .unwrap();

        let loaded = storage.load_state().unwrap().unwrap();
        assert_eq!(loaded.meta.config_hash, "second");
        assert_eq!(loaded.crawl, smaller);
        assert!(loaded.matrix.is_empty());
    }

    #[test]
    fn test_file_database_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.db");
        let crawl = sample_crawl();
        let matrix = build_frequency_matrix(&crawl.documents, &EnglishStemmer::new());

        {
            let mut storage = SqliteStorage::new(&path).unwrap();
            storage
                .save_state(&SnapshotMeta::now("hash"), &crawl, &matrix)
                .unwrap();
        }

        let storage = SqliteStorage::new(&path).unwrap();
        let loaded = storage.load_state().unwrap().unwrap();
        assert_eq!(loaded.crawl, crawl);
        assert_eq!(loaded.matrix, matrix);
    }

    #[test]
    fn test_unknown_url_list_is_corrupt() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        storage
            .save_state(
                &SnapshotMeta::now("h"),
                &CrawlState::new("http://a.com", "http://a.com"),
                &FrequencyMatrix::default(),
            )
            .unwrap();
        storage
            .conn
            .execute(
                "INSERT INTO url_lists (list, position, url) VALUES ('frontier', 0, 'x')",
                [],
            )
            .unwrap();

        assert!(matches!(
            storage.load_state(),
            Err(StorageError::Corrupt(_))
        ));
    }
}
