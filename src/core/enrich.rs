//! Catalog enrichment
//!
//! Joins each transaction to the product mapping via the numeric key
//! embedded in its ProductID. Per-record failures are isolated: a record
//! that cannot be keyed or matched simply comes out unmatched, and
//! processing continues.

use crate::types::{EnrichedTransaction, ProductMapping, Transaction};

/// Extract the first run of ASCII digits from a product identifier
///
/// "P101" → 101, "P5" → 5, "ABC12XY34" → 12. Returns `None` when the
/// identifier has no digits or the run overflows a `u64`.
pub fn extract_numeric_id(product_id: &str) -> Option<u64> {
    let digits: String = product_id
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    digits.parse().ok()
}

/// Enrich each transaction with catalog metadata
///
/// Output order matches input order, one record per input transaction.
/// Each output owns a copy of its source transaction; the input is never
/// mutated. A mapping hit copies category/brand/rating and sets the match
/// flag; a miss (or an unkeyable ProductID) leaves the metadata empty
/// with the flag false.
pub fn enrich_transactions(
    transactions: &[Transaction],
    mapping: &ProductMapping,
) -> Vec<EnrichedTransaction> {
    transactions
        .iter()
        .map(|txn| {
            let info = extract_numeric_id(&txn.product_id).and_then(|key| mapping.get(&key));

            match info {
                Some(info) => EnrichedTransaction {
                    transaction: txn.clone(),
                    api_category: Some(info.category.clone()),
                    api_brand: info.brand.clone(),
                    api_rating: Some(info.rating),
                    api_match: true,
                },
                None => EnrichedTransaction {
                    transaction: txn.clone(),
                    api_category: None,
                    api_brand: None,
                    api_rating: None,
                    api_match: false,
                },
            }
        })
        .collect()
}
