//! Storage module for persisted articles
//!
//! This module handles all database operations for the harvester:
//! - SQLite database initialization and schema management
//! - Idempotent, link-keyed article persistence
//! - Full-scan reads for the export and statistics passes

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{ArticleStore, StorageError, StorageResult};

/// A harvested article, keyed by its canonical link
///
/// Two records with the same link are the same logical article; the store
/// never persists both.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleRecord {
    pub title: String,
    pub link: String,
    pub time_marker: String,
    pub body: String,
    pub label: i64,
    pub fetched_at: String,
}
