//! Transaction-related types for the sales analytics engine
//!
//! This module defines the core record types that flow through the
//! pipeline: the parsed transaction, the pipeline attrition summary,
//! and the catalog-enriched transaction.

use rust_decimal::Decimal;

/// A single sales transaction, as produced by the parser
///
/// Fields are typed at parse time: `quantity` and `unit_price` are numeric
/// from the moment a line survives parsing. The validator additionally
/// guarantees that every string field is non-empty, that the ID prefixes
/// are correct, and that both numerics are strictly positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction identifier, expected to start with "T"
    pub transaction_id: String,

    /// Transaction date as a "YYYY-MM-DD" string
    ///
    /// Not validated as a calendar date; date aggregations order and
    /// group by the raw string.
    pub date: String,

    /// Product identifier, expected to start with "P"
    ///
    /// The enricher extracts the first run of digits from this field to
    /// key into the product catalog ("P101" joins on 101).
    pub product_id: String,

    /// Human-readable product name
    ///
    /// Commas are replaced with spaces at parse time so the value stays
    /// safe for delimited re-serialization.
    pub product_name: String,

    /// Units sold, strictly positive after validation
    pub quantity: i64,

    /// Price per unit, strictly positive after validation
    pub unit_price: Decimal,

    /// Customer identifier, expected to start with "C"
    pub customer_id: String,

    /// Sales region, free text
    pub region: String,
}

impl Transaction {
    /// Derived sale amount: quantity × unit price
    ///
    /// Returns `None` unless both quantity and unit price are strictly
    /// positive. Every aggregate goes through this guard, so a record
    /// that skipped validation can never contribute a bogus amount.
    pub fn amount(&self) -> Option<Decimal> {
        if self.quantity > 0 && self.unit_price > Decimal::ZERO {
            Some(Decimal::from(self.quantity) * self.unit_price)
        } else {
            None
        }
    }
}

/// Snapshot of pipeline attrition, produced once per run
///
/// Counts are stage-sequential: invalid records never reach the filters,
/// and the amount filters only see what the region filter let through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSummary {
    /// Number of parsed records handed to the validator
    pub total_input: usize,

    /// Records rejected by validation (missing field, bad prefix,
    /// non-positive numeric)
    pub invalid: usize,

    /// Valid records removed by the region filter
    pub filtered_by_region: usize,

    /// Valid records removed by the min/max amount filters (combined)
    pub filtered_by_amount: usize,

    /// Records that survived validation and all filters
    pub final_count: usize,
}

/// A transaction augmented with product catalog metadata
///
/// Owns an independent copy of the source transaction; mutating an
/// enriched record never affects the validated set.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTransaction {
    /// The original transaction fields, copied verbatim
    pub transaction: Transaction,

    /// Product category from the catalog, if matched
    pub api_category: Option<String>,

    /// Product brand from the catalog, if matched
    pub api_brand: Option<String>,

    /// Product rating from the catalog, if matched
    pub api_rating: Option<f64>,

    /// Whether the catalog lookup found a matching product
    pub api_match: bool,
}
