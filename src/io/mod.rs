//! I/O module
//!
//! Handles the pipe-delimited input/output files and the remote product
//! catalog.
//!
//! # Components
//!
//! - `pipe_format` - input format handling (record conversion)
//! - `reader` - streaming reader over the sales data file
//! - `enriched_writer` - enriched output file emission (skip-if-exists)
//! - `catalog` - product catalog client and mapping construction

pub mod catalog;
pub mod enriched_writer;
pub mod pipe_format;
pub mod reader;

pub use catalog::{
    build_product_mapping, CatalogSource, HttpCatalog, OfflineCatalog, DEFAULT_CATALOG_URL,
};
pub use enriched_writer::{write_enriched_file, WriteOutcome, ENRICHED_HEADER};
pub use pipe_format::{convert_record, FIELD_COUNT};
pub use reader::SalesReader;
