//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the engine snapshot.
//! A database holds at most one snapshot; saving replaces it wholesale.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Snapshot header (single row)
CREATE TABLE IF NOT EXISTS snapshot_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    schema_version INTEGER NOT NULL,
    seed_url TEXT NOT NULL,
    domain_root TEXT NOT NULL,
    config_hash TEXT NOT NULL,
    saved_at TEXT NOT NULL,
    pages_crawled INTEGER NOT NULL,
    pages_indexed INTEGER NOT NULL,
    doc_count INTEGER NOT NULL
);

-- Unique documents in matrix column order
CREATE TABLE IF NOT EXISTS documents (
    position INTEGER PRIMARY KEY,
    fingerprint TEXT NOT NULL UNIQUE,
    url TEXT NOT NULL,
    title TEXT NOT NULL,
    terms TEXT NOT NULL
);

-- Successfully fetched URLs in fetch order
CREATE TABLE IF NOT EXISTS visited (
    position INTEGER PRIMARY KEY,
    url TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    fingerprint TEXT NOT NULL
);

-- Outgoing, broken, graphic and disallowed URL lists
CREATE TABLE IF NOT EXISTS url_lists (
    list TEXT NOT NULL,
    position INTEGER NOT NULL,
    url TEXT NOT NULL,
    PRIMARY KEY (list, position)
);

-- Sorted vocabulary of stemmed terms
CREATE TABLE IF NOT EXISTS vocabulary (
    position INTEGER PRIMARY KEY,
    term TEXT NOT NULL UNIQUE
);

-- Non-zero frequency matrix cells
CREATE TABLE IF NOT EXISTS matrix_cells (
    term_position INTEGER NOT NULL REFERENCES vocabulary(position),
    doc_position INTEGER NOT NULL REFERENCES documents(position),
    count INTEGER NOT NULL,
    PRIMARY KEY (term_position, doc_position)
);
"#;

/// Tables cleared before a snapshot is written, children first
pub const SNAPSHOT_TABLES: &[&str] = &[
    "matrix_cells",
    "vocabulary",
    "url_lists",
    "visited",
    "documents",
    "snapshot_meta",
];

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Gets the current schema version
///
/// Stored with every snapshot and checked when loading.
pub fn get_schema_version() -> u32 {
    1
}
