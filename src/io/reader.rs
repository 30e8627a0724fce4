//! Streaming reader for the pipe-delimited sales data file
//!
//! Provides an iterator over transaction records parsed from the input
//! file. Delegates per-record conversion to the [`pipe_format`] module.
//!
//! # Design
//!
//! The reader wraps a `csv::Reader` configured for `|`-delimited input:
//! whitespace is trimmed from every field, the header line is skipped,
//! blank lines are ignored, and flexible record lengths are allowed so
//! that a short or long line surfaces as a per-record conversion error
//! instead of aborting the whole read.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `open()`
//! - Individual line errors are yielded as `Err` variants with line
//!   numbers; the pipeline drops those lines silently (debug log only)
//!
//! [`pipe_format`]: crate::io::pipe_format

use crate::io::pipe_format::convert_record;
use crate::types::{SalesError, Transaction};
use csv::{Reader, ReaderBuilder, StringRecordsIntoIter, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming reader over the pipe-delimited sales data file
///
/// Implements [`Iterator`], yielding `Result<Transaction, SalesError>`
/// per input line in file order.
pub struct SalesReader {
    records: StringRecordsIntoIter<File>,
}

impl SalesReader {
    /// Open the sales data file and prepare it for iteration
    ///
    /// # Errors
    ///
    /// Returns [`SalesError::FileNotFound`] when the path does not exist
    /// and [`SalesError::Io`] for any other open failure.
    pub fn open(path: &Path) -> Result<Self, SalesError> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SalesError::file_not_found(&path.display().to_string())
            } else {
                SalesError::Io {
                    message: format!("failed to open '{}': {}", path.display(), e),
                }
            }
        })?;

        let reader: Reader<File> = ReaderBuilder::new()
            .delimiter(b'|')
            .trim(Trim::All)
            .flexible(true)
            .has_headers(true)
            .from_reader(file);

        Ok(Self {
            records: reader.into_records(),
        })
    }
}

impl Iterator for SalesReader {
    type Item = Result<Transaction, SalesError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.records.next()? {
            Ok(record) => {
                let line = record.position().map(|pos| pos.line());
                Some(convert_record(&record).map_err(|e| match e {
                    SalesError::Parse { message, .. } => SalesError::Parse { line, message },
                    other => other,
                }))
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;
    use std::str::FromStr;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region\n";

    /// Helper to create a temporary sales data file for testing
    fn create_temp_sales_file(rows: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(HEADER.as_bytes())
            .expect("Failed to write header");
        file.write_all(rows.as_bytes())
            .expect("Failed to write rows");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn open_fails_on_missing_file() {
        let result = SalesReader::open(Path::new("nonexistent.txt"));
        assert_eq!(
            result.err(),
            Some(SalesError::file_not_found("nonexistent.txt"))
        );
    }

    #[test]
    fn skips_header_and_yields_records_in_order() {
        let file = create_temp_sales_file(
            "T1001|2024-01-05|P101|Widget|10|25.50|C200|North\n\
             T1002|2024-01-06|P102|Gadget|2|250.00|C201|South\n",
        );

        let reader = SalesReader::open(file.path()).unwrap();
        let records: Vec<_> = reader.filter_map(Result::ok).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].transaction_id, "T1001");
        assert_eq!(records[1].transaction_id, "T1002");
    }

    #[test]
    fn trims_whitespace_from_fields() {
        let file = create_temp_sales_file(
            "  T1001  | 2024-01-05 | P101 |  Widget  | 10 | 25.50 | C200 |  North \n",
        );

        let reader = SalesReader::open(file.path()).unwrap();
        let records: Vec<_> = reader.filter_map(Result::ok).collect();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].transaction_id, "T1001");
        assert_eq!(records[0].region, "North");
        assert_eq!(records[0].unit_price, Decimal::from_str("25.50").unwrap());
    }

    #[test]
    fn wrong_field_count_yields_error_with_line_number() {
        let file = create_temp_sales_file(
            "T1001|2024-01-05|P101|Widget|10|25.50|C200|North\n\
             T1002|2024-01-06|P102\n\
             T1003|2024-01-07|P103|Gadget|1|5.00|C202|East\n",
        );

        let reader = SalesReader::open(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        assert!(records[1].is_err());
        assert!(records[2].is_ok());

        let error = records[1].as_ref().unwrap_err().to_string();
        assert!(error.contains("line 3"), "unexpected error: {error}");
        assert!(error.contains("expected 8 fields"));
    }

    #[test]
    fn continues_after_numeric_parse_error() {
        let file = create_temp_sales_file(
            "T1001|2024-01-05|P101|Widget|ten|25.50|C200|North\n\
             T1002|2024-01-06|P102|Gadget|2|250.00|C201|South\n",
        );

        let reader = SalesReader::open(file.path()).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 2);
        assert!(records[0].is_err());
        assert!(records[1].is_ok());
    }

    #[test]
    fn skips_blank_lines() {
        let file = create_temp_sales_file(
            "T1001|2024-01-05|P101|Widget|10|25.50|C200|North\n\
             \n\
             T1002|2024-01-06|P102|Gadget|2|250.00|C201|South\n",
        );

        let reader = SalesReader::open(file.path()).unwrap();
        let records: Vec<_> = reader.filter_map(Result::ok).collect();

        assert_eq!(records.len(), 2);
    }

    #[test]
    fn empty_file_after_header_yields_nothing() {
        let file = create_temp_sales_file("");

        let reader = SalesReader::open(file.path()).unwrap();
        assert_eq!(reader.count(), 0);
    }
}
