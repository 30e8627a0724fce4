//! Sales Analytics Engine Library
//! # Overview
//!
//! This library ingests pipe-delimited sales transaction records,
//! validates and filters them, computes descriptive aggregates, enriches
//! each transaction from a remote product catalog, and emits a text
//! report plus an enriched data file.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, FilterSummary, catalog types, errors)
//! - [`cli`] - CLI argument parsing
//! - [`io`] - Input parsing, enriched-file output, product catalog client
//! - [`core`] - Business logic:
//!   - [`core::validator`] - Validation rules and region/amount filters
//!   - [`core::analytics`] - The seven aggregate views
//!   - [`core::enrich`] - The catalog join
//! - [`report`] - Text report rendering
//! - [`pipeline`] - Stage orchestration
//!
//! # Data Flow
//!
//! Raw lines → parser → validator/filter → {aggregator, enricher} →
//! rendering sinks. The aggregator and enricher both consume the same
//! validated set independently; neither depends on the other's output.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod report;
pub mod types;

pub use core::{enrich_transactions, validate_and_filter, FilterOptions};
pub use io::{CatalogSource, HttpCatalog, OfflineCatalog, SalesReader};
pub use pipeline::{run, HaltReason, PipelineConfig, RunOutcome, RunSummary};
pub use types::{
    EnrichedTransaction, FilterSummary, ProductMapping, SalesError, Transaction,
};
