//! Product catalog types
//!
//! Types for the remote product catalog: the raw API payload shapes and
//! the read-only lookup table the enricher joins against.

use serde::Deserialize;
use std::collections::HashMap;

/// One product as returned by the catalog API
///
/// Only the fields the enricher cares about are deserialized; the API
/// returns many more, which serde ignores.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogProduct {
    /// Numeric product key the enricher joins on
    pub id: u64,

    /// Product title
    #[serde(default)]
    pub title: String,

    /// Product category
    #[serde(default)]
    pub category: String,

    /// Product brand; absent for some catalog entries
    #[serde(default)]
    pub brand: Option<String>,

    /// Average product rating
    #[serde(default)]
    pub rating: f64,
}

/// Top-level catalog API response: `{ "products": [...] }`
#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub products: Vec<CatalogProduct>,
}

/// Catalog metadata kept per product key
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInfo {
    pub title: String,
    pub category: String,
    pub brand: Option<String>,
    pub rating: f64,
}

/// Read-only lookup table from numeric product key to catalog metadata
///
/// Built once from API results; the enricher only reads it.
pub type ProductMapping = HashMap<u64, ProductInfo>;
