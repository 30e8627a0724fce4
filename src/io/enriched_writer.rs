//! Writer for the enriched sales data file
//!
//! Emits the pipe-delimited enriched output: the eight original
//! transaction fields verbatim, followed by the four catalog columns.
//!
//! An existing file at the target path is never overwritten; the write is
//! skipped and reported to the caller as a normal outcome.

use crate::types::{EnrichedTransaction, SalesError};
use csv::WriterBuilder;
use std::path::Path;

/// Column layout of the enriched output file
pub const ENRICHED_HEADER: [&str; 12] = [
    "TransactionID",
    "Date",
    "ProductID",
    "ProductName",
    "Quantity",
    "UnitPrice",
    "CustomerID",
    "Region",
    "API_category",
    "API_brand",
    "API_rating",
    "API_match",
];

/// Result of an enriched-file write attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File written with this many data rows
    Written(usize),
    /// A file already existed at the target path; nothing was written
    SkippedExisting,
}

/// Write the enriched transactions to a pipe-delimited file
///
/// Missing API fields are written as empty strings; `API_match` is
/// rendered as literal `True`/`False`. Parent directories are created as
/// needed.
///
/// # Errors
///
/// Returns [`SalesError::Io`] on directory creation or write failures.
/// An already-existing target file is not an error; it yields
/// [`WriteOutcome::SkippedExisting`].
pub fn write_enriched_file(
    path: &Path,
    enriched: &[EnrichedTransaction],
) -> Result<WriteOutcome, SalesError> {
    if path.exists() {
        return Ok(WriteOutcome::SkippedExisting);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = WriterBuilder::new().delimiter(b'|').from_path(path)?;

    writer.write_record(ENRICHED_HEADER)?;

    for record in enriched {
        let txn = &record.transaction;
        writer.write_record(&[
            txn.transaction_id.clone(),
            txn.date.clone(),
            txn.product_id.clone(),
            txn.product_name.clone(),
            txn.quantity.to_string(),
            txn.unit_price.to_string(),
            txn.customer_id.clone(),
            txn.region.clone(),
            record.api_category.clone().unwrap_or_default(),
            record.api_brand.clone().unwrap_or_default(),
            record
                .api_rating
                .map(|r| r.to_string())
                .unwrap_or_default(),
            if record.api_match { "True" } else { "False" }.to_string(),
        ])?;
    }

    writer.flush()?;

    Ok(WriteOutcome::Written(enriched.len()))
}
