//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Transaction records, filter summary, enriched records
//! - `catalog`: Product catalog payloads and the lookup mapping
//! - `error`: Error types for the sales analytics engine

pub mod catalog;
pub mod error;
pub mod transaction;

pub use catalog::{CatalogProduct, CatalogResponse, ProductInfo, ProductMapping};
pub use error::SalesError;
pub use transaction::{EnrichedTransaction, FilterSummary, Transaction};
