//! Transaction validation and filtering
//!
//! The second pipeline stage: enforces the record-level invariants every
//! downstream consumer relies on, then applies the caller's optional
//! region/amount filters, counting attrition at each step into a
//! [`FilterSummary`].
//!
//! This stage never errors. Invalid records are counted and excluded,
//! never surfaced individually; an empty result is a normal outcome the
//! pipeline decides how to handle.

use crate::types::{FilterSummary, Transaction};
use rust_decimal::Decimal;
use tracing::debug;

/// Optional filters applied to the valid set
///
/// Applied in order region → min amount → max amount; both amount bounds
/// are inclusive.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Case-insensitive, whitespace-trimmed exact region match
    pub region: Option<String>,

    /// Minimum sale amount (quantity × unit price), inclusive
    pub min_amount: Option<Decimal>,

    /// Maximum sale amount, inclusive
    pub max_amount: Option<Decimal>,
}

/// Why a record failed validation; first failing rule wins
///
/// Only used for debug logging - the summary reports a single invalid
/// count, never per-record reasons.
fn validation_failure(txn: &Transaction) -> Option<&'static str> {
    // Rule order matters: field presence, then prefixes (T, P, C), then
    // numeric positivity. A record fails at most one rule.
    if txn.transaction_id.is_empty()
        || txn.date.is_empty()
        || txn.product_id.is_empty()
        || txn.product_name.is_empty()
        || txn.customer_id.is_empty()
        || txn.region.is_empty()
    {
        return Some("missing required field");
    }
    if !txn.transaction_id.starts_with('T') {
        return Some("transaction id must start with 'T'");
    }
    if !txn.product_id.starts_with('P') {
        return Some("product id must start with 'P'");
    }
    if !txn.customer_id.starts_with('C') {
        return Some("customer id must start with 'C'");
    }
    if txn.quantity <= 0 {
        return Some("quantity must be positive");
    }
    if txn.unit_price <= Decimal::ZERO {
        return Some("unit price must be positive");
    }
    None
}

/// Validate transactions and apply the optional filters
///
/// Returns the attrition summary and the surviving records in input
/// order. Filters only ever see valid records, so an invalid record
/// counts toward `invalid` and nothing else. Filter counts are
/// stage-sequential: the amount filters count removals from the set the
/// region filter already narrowed.
///
/// Re-running this function on its own output with no filters returns
/// the identical set (validation is idempotent).
pub fn validate_and_filter(
    transactions: Vec<Transaction>,
    options: &FilterOptions,
) -> (FilterSummary, Vec<Transaction>) {
    let mut summary = FilterSummary {
        total_input: transactions.len(),
        ..FilterSummary::default()
    };

    let mut surviving: Vec<Transaction> = transactions
        .into_iter()
        .filter(|txn| match validation_failure(txn) {
            None => true,
            Some(reason) => {
                debug!(transaction_id = %txn.transaction_id, reason, "invalid record");
                summary.invalid += 1;
                false
            }
        })
        .collect();

    if let Some(region) = options.region.as_deref() {
        let wanted = region.trim();
        let before = surviving.len();
        surviving.retain(|txn| txn.region.trim().eq_ignore_ascii_case(wanted));
        summary.filtered_by_region = before - surviving.len();
    }

    if let Some(min) = options.min_amount {
        let before = surviving.len();
        surviving.retain(|txn| txn.amount().unwrap_or_default() >= min);
        summary.filtered_by_amount += before - surviving.len();
    }

    if let Some(max) = options.max_amount {
        let before = surviving.len();
        surviving.retain(|txn| txn.amount().unwrap_or_default() <= max);
        summary.filtered_by_amount += before - surviving.len();
    }

    summary.final_count = surviving.len();
    (summary, surviving)
}
