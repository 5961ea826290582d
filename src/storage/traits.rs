//! Storage trait and error types
//!
//! This module defines the trait interface for article store backends and
//! associated error types.

use crate::storage::ArticleRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for article store backends
///
/// The store is keyed by the article's canonical link: for any link there is
/// at most one persisted record, no matter how many times it is offered.
pub trait ArticleStore {
    /// Returns true if an article with this link is already stored
    fn exists(&self, link: &str) -> StorageResult<bool>;

    /// Inserts the record unless its link is already present
    ///
    /// Returns true if the record was inserted, false if the link was
    /// already stored. Safe to call repeatedly with the same key; a repeat
    /// never modifies the previously stored record.
    fn insert_if_absent(&mut self, record: &ArticleRecord) -> StorageResult<bool>;

    /// Loads every stored article in insertion order
    ///
    /// Used by the export and statistics passes, not by the harvest loop.
    fn load_all(&self) -> StorageResult<Vec<ArticleRecord>>;

    /// Total number of stored articles
    fn count(&self) -> StorageResult<u64>;

    /// Distinct labels present in the store, ascending
    fn labels(&self) -> StorageResult<Vec<i64>>;

    /// Number of stored articles carrying the given label
    fn count_by_label(&self, label: i64) -> StorageResult<u64>;
}
