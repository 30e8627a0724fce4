//! Core business logic
//!
//! The non-I/O heart of the pipeline:
//! - `validator` - record validation and the region/amount filters
//! - `analytics` - the seven aggregate views
//! - `enrich` - the catalog join

pub mod analytics;
pub mod enrich;
pub mod validator;

pub use analytics::{
    customer_analysis, daily_sales_trend, find_peak_sales_day, low_performing_products,
    region_wise_sales, top_selling_products, total_revenue, CustomerStats, DailyStats, PeakDay,
    ProductStats, RegionStats,
};
pub use enrich::{enrich_transactions, extract_numeric_id};
pub use validator::{validate_and_filter, FilterOptions};
