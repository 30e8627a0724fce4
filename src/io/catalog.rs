//! Product catalog client
//!
//! Fetches product metadata from the remote catalog API and builds the
//! read-only [`ProductMapping`] the enricher joins against.
//!
//! The fetch itself sits behind the [`CatalogSource`] trait so the
//! pipeline can run against a stub in tests and against nothing at all in
//! offline mode. A fetch failure is a degraded outcome, not a fatal one:
//! the pipeline logs it and proceeds with an empty mapping.

use crate::types::{CatalogProduct, CatalogResponse, ProductInfo, ProductMapping, SalesError};
use std::collections::HashMap;

/// Default product catalog endpoint
pub const DEFAULT_CATALOG_URL: &str = "https://dummyjson.com/products";

/// Source of product catalog records
///
/// The seam between the pipeline and the outside world: production uses
/// [`HttpCatalog`], offline runs use [`OfflineCatalog`], tests supply
/// their own stub.
pub trait CatalogSource {
    /// Fetch all catalog products
    ///
    /// # Errors
    ///
    /// Returns [`SalesError::Catalog`] on network, HTTP status, or
    /// decode failures.
    fn fetch_products(&self) -> Result<Vec<CatalogProduct>, SalesError>;
}

/// Catalog source backed by a blocking HTTP GET
///
/// No retry or timeout policy lives here; a single request either
/// produces a product list or a catalog error.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    url: String,
}

impl HttpCatalog {
    /// Create a catalog client for the given endpoint URL
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Default for HttpCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

impl CatalogSource for HttpCatalog {
    fn fetch_products(&self) -> Result<Vec<CatalogProduct>, SalesError> {
        let response = reqwest::blocking::get(&self.url)?.error_for_status()?;
        let body: CatalogResponse = response.json()?;
        Ok(body.products)
    }
}

/// Catalog source that always returns no products
///
/// Used by `--offline` runs; every transaction comes out unmatched.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineCatalog;

impl CatalogSource for OfflineCatalog {
    fn fetch_products(&self) -> Result<Vec<CatalogProduct>, SalesError> {
        Ok(Vec::new())
    }
}

/// Build the product key → metadata lookup table
///
/// Products with an empty title are skipped; everything else is indexed
/// by its numeric id. Later duplicates of the same id overwrite earlier
/// ones.
pub fn build_product_mapping(products: &[CatalogProduct]) -> ProductMapping {
    let mut mapping: ProductMapping = HashMap::with_capacity(products.len());

    for product in products {
        let title = product.title.trim();
        if title.is_empty() {
            continue;
        }

        mapping.insert(
            product.id,
            ProductInfo {
                title: title.to_string(),
                category: product.category.trim().to_string(),
                brand: product
                    .brand
                    .as_deref()
                    .map(str::trim)
                    .filter(|b| !b.is_empty())
                    .map(str::to_string),
                rating: product.rating,
            },
        );
    }

    mapping
}
