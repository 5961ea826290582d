//! Statistics over the article store
//!
//! This module provides functionality for extracting and displaying
//! store statistics: total article count and the per-label breakdown.

use crate::storage::ArticleStore;
use crate::KlipingError;

/// Store statistics summary
#[derive(Debug, Clone)]
pub struct StoreStatistics {
    /// Total number of stored articles
    pub total_articles: u64,

    /// Article count per label, ascending by label
    pub labels: Vec<(i64, u64)>,
}

/// Loads statistics from the store
pub fn load_statistics(store: &dyn ArticleStore) -> Result<StoreStatistics, KlipingError> {
    let total_articles = store.count()?;

    let mut labels = Vec::new();
    for label in store.labels()? {
        labels.push((label, store.count_by_label(label)?));
    }

    Ok(StoreStatistics {
        total_articles,
        labels,
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &StoreStatistics) {
    println!("=== Store Statistics ===\n");

    println!("Total articles: {}", stats.total_articles);

    if !stats.labels.is_empty() {
        println!("\nArticles by label:");
        for (label, count) in &stats.labels {
            let percentage = if stats.total_articles > 0 {
                (*count as f64 / stats.total_articles as f64) * 100.0
            } else {
                0.0
            };
            println!("  label {}: {} ({:.1}%)", label, count, percentage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{ArticleRecord, SqliteStore};

    fn record(link: &str, label: i64) -> ArticleRecord {
        ArticleRecord {
            title: "t".to_string(),
            link: link.to_string(),
            time_marker: "N/A".to_string(),
            body: String::new(),
            label,
            fetched_at: "2025-06-02T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_load_statistics() {
        let mut store = SqliteStore::new_in_memory().unwrap();
        store.insert_if_absent(&record("https://x/1", 0)).unwrap();
        store.insert_if_absent(&record("https://x/2", 1)).unwrap();
        store.insert_if_absent(&record("https://x/3", 1)).unwrap();

        let stats = load_statistics(&store).unwrap();
        assert_eq!(stats.total_articles, 3);
        assert_eq!(stats.labels, vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_load_statistics_empty_store() {
        let store = SqliteStore::new_in_memory().unwrap();
        let stats = load_statistics(&store).unwrap();
        assert_eq!(stats.total_articles, 0);
        assert!(stats.labels.is_empty());
    }
}
