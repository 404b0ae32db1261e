//! CSV text parsing and local file loading.
//!
//! The format is deliberately naive: lines are split on `\n`, fields on `,`.
//! Quoted fields are not understood, so a comma inside quotes splits the
//! field and an embedded newline starts a new record.

use std::path::Path;

use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::Row;
use tracing::debug;

// ── Public types ──────────────────────────────────────────────────────────────

/// Output of [`parse_csv`]: the header list plus one [`Row`] per record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedCsv {
    /// Trimmed header names in file order.
    pub headers: Vec<String>,
    /// Data records in file order.
    pub rows: Vec<Row>,
}

impl ParsedCsv {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse CSV text with a header line into rows keyed by header.
///
/// * Headers and values are whitespace-trimmed (this also drops `\r`).
/// * Lines that are empty after trimming are skipped.
/// * A short line gets `""` for its missing columns; extra values are
///   dropped, so every row carries one key per header.
pub fn parse_csv(text: &str) -> ParsedCsv {
    let mut lines = text.split('\n');

    let headers: Vec<String> = match lines.next() {
        Some(first) if !first.trim().is_empty() => {
            first.split(',').map(|h| h.trim().to_string()).collect()
        }
        _ => {
            debug!("CSV input has no header line");
            return ParsedCsv::default();
        }
    };

    let mut rows: Vec<Row> = Vec::new();
    let mut skipped = 0usize;

    for line in lines {
        if line.trim().is_empty() {
            skipped += 1;
            continue;
        }

        let mut values = line.split(',').map(str::trim);
        let mut row = Row::new();
        for header in &headers {
            row.insert(header.clone(), values.next().unwrap_or(""));
        }
        rows.push(row);
    }

    debug!(
        headers = headers.len(),
        rows = rows.len(),
        blank_lines = skipped,
        "parsed CSV"
    );

    ParsedCsv { headers, rows }
}

/// Read a CSV file from disk and parse it with [`parse_csv`].
pub fn load_csv_file(path: &Path) -> Result<ParsedCsv> {
    let text = std::fs::read_to_string(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(parse_csv(&text))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "Month,Date,User Name,# of Hours,Productivity (%)\n\
                          March,2024-03-04,Asha,8,90\n\
                          March,2024-03-04,Ravi,7.5,85\n\
                          April,2024-04-01,Asha,6,70\n";

    #[test]
    fn test_rows_times_headers() {
        let parsed = parse_csv(SAMPLE);
        assert_eq!(parsed.headers.len(), 5);
        assert_eq!(parsed.rows.len(), 3);
        for row in &parsed.rows {
            assert_eq!(row.len(), 5);
        }
        assert_eq!(parsed.rows[1].get("User Name"), Some("Ravi"));
        assert_eq!(parsed.rows[2].get("Month"), Some("April"));
    }

    #[test]
    fn test_headers_and_values_trimmed() {
        let parsed = parse_csv(" Month , User Name \r\n March ,  Asha \r\n");
        assert_eq!(parsed.headers, vec!["Month", "User Name"]);
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].get("Month"), Some("March"));
        assert_eq!(parsed.rows[0].get("User Name"), Some("Asha"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let parsed = parse_csv("A,B\n1,2\n\n   \n\r\n3,4\n");
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[1].get("A"), Some("3"));
    }

    #[test]
    fn test_short_line_fills_empty_values() {
        let parsed = parse_csv("A,B,C\n1\n");
        let row = &parsed.rows[0];
        assert_eq!(row.len(), 3);
        assert_eq!(row.get("A"), Some("1"));
        assert_eq!(row.get("B"), Some(""));
        assert_eq!(row.get("C"), Some(""));
    }

    #[test]
    fn test_extra_values_dropped() {
        let parsed = parse_csv("A,B\n1,2,3,4\n");
        let row = &parsed.rows[0];
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("B"), Some("2"));
    }

    #[test]
    fn test_quoted_commas_are_not_special() {
        let parsed = parse_csv("Project Name,Target\n\"Atlas, phase 2\",10\n");
        let row = &parsed.rows[0];
        assert_eq!(row.get("Project Name"), Some("\"Atlas"));
        assert_eq!(row.get("Target"), Some("phase 2\""));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("\n\n").headers.is_empty());
    }

    #[test]
    fn test_header_only() {
        let parsed = parse_csv("A,B\n");
        assert_eq!(parsed.headers, vec!["A", "B"]);
        assert!(parsed.rows.is_empty());
    }

    #[test]
    fn test_no_trailing_newline() {
        let parsed = parse_csv("A,B\n1,2");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.rows[0].get("B"), Some("2"));
    }

    #[test]
    fn test_load_csv_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SAMPLE.as_bytes()).expect("write sample");
        let parsed = load_csv_file(file.path()).expect("load");
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let err = load_csv_file(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::FileRead { .. }));
    }
}
