//! CSV export of the article store
//!
//! A pure read-and-serialize pass: every stored record becomes one CSV row.
//! Fields containing separators, quotes, or line breaks are quoted per
//! RFC 4180.

use crate::storage::{ArticleRecord, ArticleStore};
use crate::KlipingError;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Column order of the export
const CSV_HEADER: &str = "title,link,time_marker,body,label,fetched_at";

/// Exports every stored article to a CSV file
///
/// Returns the number of exported records.
pub fn export_csv(store: &dyn ArticleStore, output_path: &Path) -> Result<u64, KlipingError> {
    let records = store.load_all()?;
    let csv = format_csv(&records);

    let mut file = File::create(output_path)?;
    file.write_all(csv.as_bytes())?;

    info!(
        count = records.len(),
        path = %output_path.display(),
        "Exported articles to CSV"
    );
    Ok(records.len() as u64)
}

/// Formats records as a CSV document with a header row
pub fn format_csv(records: &[ArticleRecord]) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');

    for record in records {
        out.push_str(&csv_field(&record.title));
        out.push(',');
        out.push_str(&csv_field(&record.link));
        out.push(',');
        out.push_str(&csv_field(&record.time_marker));
        out.push(',');
        out.push_str(&csv_field(&record.body));
        out.push(',');
        out.push_str(&record.label.to_string());
        out.push(',');
        out.push_str(&csv_field(&record.fetched_at));
        out.push('\n');
    }

    out
}

/// Quotes a field when it contains a separator, quote, or line break
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, body: &str) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            link: "https://x/1".to_string(),
            time_marker: "N/A".to_string(),
            body: body.to_string(),
            label: 0,
            fetched_at: "2025-06-02T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_empty_store_yields_header_only() {
        assert_eq!(format_csv(&[]), format!("{}\n", CSV_HEADER));
    }

    #[test]
    fn test_plain_row() {
        let csv = format_csv(&[record("Plain title", "Plain body.")]);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(CSV_HEADER));
        assert_eq!(
            lines.next(),
            Some("Plain title,https://x/1,N/A,Plain body.,0,2025-06-02T00:00:00+00:00")
        );
    }

    #[test]
    fn test_comma_field_is_quoted() {
        let csv = format_csv(&[record("One, two", "ok")]);
        assert!(csv.contains("\"One, two\""));
    }

    #[test]
    fn test_quote_field_is_doubled() {
        let csv = format_csv(&[record("He said \"no\"", "ok")]);
        assert!(csv.contains("\"He said \"\"no\"\"\""));
    }

    #[test]
    fn test_newline_field_is_quoted() {
        let csv = format_csv(&[record("Title", "line one\nline two")]);
        assert!(csv.contains("\"line one\nline two\""));
    }

    #[test]
    fn test_export_writes_file() {
        use crate::storage::SqliteStore;

        let mut store = SqliteStore::new_in_memory().unwrap();
        store.insert_if_absent(&record("Title", "Body")).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let exported = export_csv(&store, &path).unwrap();

        assert_eq!(exported, 1);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with(CSV_HEADER));
        assert!(written.contains("https://x/1"));
    }
}
