//! SQLite store implementation
//!
//! This module provides the SQLite-based implementation of the ArticleStore
//! trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ArticleStore, StorageError, StorageResult};
use crate::storage::ArticleRecord;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite store backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates the article database at the given path
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl ArticleStore for SqliteStore {
    fn exists(&self, link: &str) -> StorageResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM articles WHERE link = ?1",
                params![link],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn insert_if_absent(&mut self, record: &ArticleRecord) -> StorageResult<bool> {
        if record.link.is_empty() {
            return Err(StorageError::ConstraintViolation(
                "article link must not be empty".to_string(),
            ));
        }

        // The UNIQUE constraint on link makes the repeat case a no-op
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO articles (link, title, time_marker, body, label, fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.link,
                record.title,
                record.time_marker,
                record.body,
                record.label,
                record.fetched_at
            ],
        )?;

        Ok(changed > 0)
    }

    fn load_all(&self) -> StorageResult<Vec<ArticleRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT title, link, time_marker, body, label, fetched_at
             FROM articles ORDER BY id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(ArticleRecord {
                title: row.get(0)?,
                link: row.get(1)?,
                time_marker: row.get(2)?,
                body: row.get(3)?,
                label: row.get(4)?,
                fetched_at: row.get(5)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    fn count(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn labels(&self) -> StorageResult<Vec<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT label FROM articles ORDER BY label")?;

        let rows = stmt.query_map([], |row| row.get(0))?;
        let mut labels = Vec::new();
        for row in rows {
            labels.push(row?);
        }
        Ok(labels)
    }

    fn count_by_label(&self, label: i64) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM articles WHERE label = ?1",
            params![label],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
