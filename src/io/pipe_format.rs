//! Pipe-delimited format handling for sales transaction records
//!
//! This module centralizes the input format concerns: the expected field
//! layout, per-field cleanup, and conversion from a raw delimited record
//! to the typed [`Transaction`]. All functions are pure (no I/O) for easy
//! testing.

use crate::types::{SalesError, Transaction};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Number of fields in a well-formed input line
///
/// Field order: TransactionID, Date, ProductID, ProductName, Quantity,
/// UnitPrice, CustomerID, Region.
pub const FIELD_COUNT: usize = 8;

/// Convert a raw delimited record into a [`Transaction`]
///
/// Cleanup applied here, and only here:
/// - ProductName: commas replaced with spaces (keeps the value safe for
///   later delimited output without corrupting word boundaries)
/// - Quantity/UnitPrice: thousands-separator commas removed, then parsed
///   as integer / decimal
///
/// No other normalization happens at this stage; prefix checks and
/// positivity are the validator's job.
///
/// # Errors
///
/// Returns a parse error when the field count is not [`FIELD_COUNT`] or
/// when a numeric field does not parse. Callers treat these as
/// recoverable: the line is dropped and processing continues.
pub fn convert_record(record: &StringRecord) -> Result<Transaction, SalesError> {
    if record.len() != FIELD_COUNT {
        return Err(SalesError::parse(
            None,
            format!("expected {} fields, got {}", FIELD_COUNT, record.len()),
        ));
    }

    let quantity_raw = record[4].replace(',', "");
    let quantity = i64::from_str(&quantity_raw).map_err(|_| {
        SalesError::parse(None, format!("invalid quantity '{}'", &record[4]))
    })?;

    let unit_price_raw = record[5].replace(',', "");
    let unit_price = Decimal::from_str(&unit_price_raw).map_err(|_| {
        SalesError::parse(None, format!("invalid unit price '{}'", &record[5]))
    })?;

    Ok(Transaction {
        transaction_id: record[0].to_string(),
        date: record[1].to_string(),
        product_id: record[2].to_string(),
        product_name: record[3].replace(',', " "),
        quantity,
        unit_price,
        customer_id: record[6].to_string(),
        region: record[7].to_string(),
    })
}
