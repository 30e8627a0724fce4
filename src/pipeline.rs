//! Pipeline orchestration
//!
//! Runs the staged flow end to end: read/parse → validate/filter →
//! {aggregate, enrich} → write enriched file → render report. The stages
//! themselves live in [`io`], [`core`], and [`report`]; this module only
//! sequences them, logs progress, and decides what halts a run.
//!
//! Empty-data conditions (empty input, nothing parsed, nothing valid)
//! are normal halts, not errors. The only fatal outcomes are I/O
//! failures opening the input or writing the outputs.
//!
//! [`io`]: crate::io
//! [`core`]: crate::core
//! [`report`]: crate::report

use crate::core::analytics::{
    customer_analysis, daily_sales_trend, find_peak_sales_day, low_performing_products,
    top_selling_products, total_revenue,
};
use crate::core::enrich::enrich_transactions;
use crate::core::validator::{validate_and_filter, FilterOptions};
use crate::io::catalog::{build_product_mapping, CatalogSource};
use crate::io::enriched_writer::{write_enriched_file, WriteOutcome};
use crate::io::reader::SalesReader;
use crate::report::generate_sales_report;
use crate::types::{FilterSummary, SalesError, Transaction};
use rust_decimal::Decimal;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Everything a run needs to know
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path to the pipe-delimited sales data file
    pub input: PathBuf,

    /// Optional region/amount filters
    pub filters: FilterOptions,

    /// How many products the top-sellers view returns
    pub top_n: usize,

    /// Quantity threshold for the low-performers view
    pub low_threshold: i64,

    /// Target path for the enriched data file
    pub enriched_path: PathBuf,

    /// Target path for the text report
    pub report_path: PathBuf,
}

/// Why a run stopped before producing outputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// The input file had no data lines at all
    EmptyInput,
    /// Lines existed but none parsed into a transaction
    NoParsedRecords,
    /// Transactions parsed but none survived validation and filtering
    NoValidTransactions,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::EmptyInput => write!(f, "no data found in input file"),
            HaltReason::NoParsedRecords => write!(f, "no parseable transactions found"),
            HaltReason::NoValidTransactions => {
                write!(f, "no valid transactions after filtering")
            }
        }
    }
}

/// Tallies from a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Transactions that parsed successfully
    pub parsed: usize,
    /// Validation/filter attrition counters
    pub filter_summary: FilterSummary,
    /// Total revenue over the final set
    pub total_revenue: Decimal,
    /// Number of enriched records produced
    pub enriched_total: usize,
    /// Enriched records that matched a catalog product
    pub enriched_matched: usize,
    /// Whether the enriched file was written or skipped
    pub enriched_write: WriteOutcome,
}

/// Result of a pipeline run that did not fail outright
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// An empty-data condition stopped the run early; not an error
    Halted(HaltReason),
    /// All stages ran and both output files were handled
    Completed(RunSummary),
}

/// Execute the full pipeline
///
/// # Errors
///
/// Returns [`SalesError`] only for fatal conditions: the input file
/// cannot be opened, or an output file cannot be written. Catalog fetch
/// failures degrade to an empty mapping with a warning.
pub fn run(config: &PipelineConfig, catalog: &dyn CatalogSource) -> Result<RunOutcome, SalesError> {
    // Stage 1+2: read and parse
    info!(input = %config.input.display(), "reading sales data");
    let reader = SalesReader::open(&config.input)?;

    let mut raw_lines = 0usize;
    let mut parsed: Vec<Transaction> = Vec::new();
    for result in reader {
        raw_lines += 1;
        match result {
            Ok(txn) => parsed.push(txn),
            // Parse-recoverable: the line is dropped, nothing is surfaced
            Err(e) => debug!(error = %e, "dropped malformed line"),
        }
    }
    info!(raw_lines, parsed = parsed.len(), "parse stage complete");

    if raw_lines == 0 {
        return Ok(RunOutcome::Halted(HaltReason::EmptyInput));
    }
    if parsed.is_empty() {
        return Ok(RunOutcome::Halted(HaltReason::NoParsedRecords));
    }

    // Stage 3: validate and filter
    let parsed_count = parsed.len();
    let (filter_summary, valid) = validate_and_filter(parsed, &config.filters);
    info!(
        total_input = filter_summary.total_input,
        invalid = filter_summary.invalid,
        filtered_by_region = filter_summary.filtered_by_region,
        filtered_by_amount = filter_summary.filtered_by_amount,
        final_count = filter_summary.final_count,
        "validation and filtering complete"
    );
    if valid.is_empty() {
        return Ok(RunOutcome::Halted(HaltReason::NoValidTransactions));
    }

    // Stage 4: aggregate
    let revenue = total_revenue(&valid);
    info!(%revenue, "total revenue calculated");
    let top_products = top_selling_products(&valid, config.top_n);
    info!(count = top_products.len(), "top products computed");
    let customers = customer_analysis(&valid);
    info!(count = customers.len(), "customer analysis computed");
    let trend = daily_sales_trend(&valid);
    info!(days = trend.len(), "daily sales trend computed");
    if let Some(peak) = find_peak_sales_day(&valid) {
        info!(date = %peak.date, revenue = %peak.total_revenue, "peak sales day");
    }
    let low_products = low_performing_products(&valid, config.low_threshold);
    info!(
        count = low_products.len(),
        threshold = config.low_threshold,
        "low performing products computed"
    );

    // Stage 5: fetch catalog and enrich; fetch failure degrades to an
    // empty mapping and everything comes out unmatched
    let products = match catalog.fetch_products() {
        Ok(products) => {
            info!(count = products.len(), "fetched catalog products");
            products
        }
        Err(e) => {
            warn!(error = %e, "catalog fetch failed, continuing unenriched");
            Vec::new()
        }
    };
    let mapping = build_product_mapping(&products);
    let enriched = enrich_transactions(&valid, &mapping);
    let matched = enriched.iter().filter(|e| e.api_match).count();
    info!(
        matched,
        total = enriched.len(),
        "enrichment complete"
    );

    // Stage 6: write enriched file (never overwrites)
    let enriched_write = write_enriched_file(&config.enriched_path, &enriched)?;
    match enriched_write {
        WriteOutcome::Written(rows) => {
            info!(path = %config.enriched_path.display(), rows, "enriched data written");
        }
        WriteOutcome::SkippedExisting => {
            warn!(
                path = %config.enriched_path.display(),
                "enriched file already exists, skipping write"
            );
        }
    }

    // Stage 7: render report
    generate_sales_report(&valid, &enriched, &config.report_path)?;
    info!(path = %config.report_path.display(), "sales report generated");

    Ok(RunOutcome::Completed(RunSummary {
        parsed: parsed_count,
        filter_summary,
        total_revenue: revenue,
        enriched_total: enriched.len(),
        enriched_matched: matched,
        enriched_write,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CatalogProduct;
    use std::io::Write;
    use tempfile::TempDir;

    /// Catalog stub yielding a fixed product list
    struct StubCatalog(Vec<CatalogProduct>);

    impl CatalogSource for StubCatalog {
        fn fetch_products(&self) -> Result<Vec<CatalogProduct>, SalesError> {
            Ok(self.0.clone())
        }
    }

    /// Catalog stub that always fails
    struct FailingCatalog;

    impl CatalogSource for FailingCatalog {
        fn fetch_products(&self) -> Result<Vec<CatalogProduct>, SalesError> {
            Err(SalesError::Catalog {
                message: "connection refused".to_string(),
            })
        }
    }

    fn write_input(dir: &TempDir, rows: &str) -> PathBuf {
        let path = dir.path().join("sales_data.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "TransactionID|Date|ProductID|ProductName|Quantity|UnitPrice|CustomerID|Region"
        )
        .unwrap();
        file.write_all(rows.as_bytes()).unwrap();
        path
    }

    fn config(dir: &TempDir, input: PathBuf) -> PipelineConfig {
        PipelineConfig {
            input,
            filters: FilterOptions::default(),
            top_n: 5,
            low_threshold: 100,
            enriched_path: dir.path().join("out/enriched_sales_data.txt"),
            report_path: dir.path().join("out/sales_report.txt"),
        }
    }

    fn product(id: u64) -> CatalogProduct {
        CatalogProduct {
            id,
            title: "Mascara".to_string(),
            category: "beauty".to_string(),
            brand: Some("Essence".to_string()),
            rating: 4.5,
        }
    }

    #[test]
    fn completes_and_writes_both_outputs() {
        let dir = TempDir::new().unwrap();
        let input = write_input(
            &dir,
            "T1001|2024-01-05|P101|Widget|10|25.50|C200|North\n\
             T1002|2024-01-06|P999|Gadget|1|500.00|C201|South\n",
        );
        let config = config(&dir, input);

        let outcome = run(&config, &StubCatalog(vec![product(101)])).unwrap();

        let summary = match outcome {
            RunOutcome::Completed(summary) => summary,
            other => panic!("expected completion, got {other:?}"),
        };
        assert_eq!(summary.parsed, 2);
        assert_eq!(summary.filter_summary.final_count, 2);
        assert_eq!(summary.enriched_total, 2);
        assert_eq!(summary.enriched_matched, 1);
        assert_eq!(summary.enriched_write, WriteOutcome::Written(2));
        assert!(config.enriched_path.exists());
        assert!(config.report_path.exists());
    }

    #[test]
    fn halts_on_empty_input() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "");
        let config = config(&dir, input);

        let outcome = run(&config, &StubCatalog(Vec::new())).unwrap();
        assert_eq!(outcome, RunOutcome::Halted(HaltReason::EmptyInput));
        assert!(!config.report_path.exists());
    }

    #[test]
    fn halts_when_nothing_parses() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "only|three|fields\n");
        let config = config(&dir, input);

        let outcome = run(&config, &StubCatalog(Vec::new())).unwrap();
        assert_eq!(outcome, RunOutcome::Halted(HaltReason::NoParsedRecords));
    }

    #[test]
    fn halts_when_nothing_survives_validation() {
        let dir = TempDir::new().unwrap();
        // Bad prefix on every record
        let input = write_input(&dir, "X1|2024-01-05|P101|Widget|10|25.50|C200|North\n");
        let config = config(&dir, input);

        let outcome = run(&config, &StubCatalog(Vec::new())).unwrap();
        assert_eq!(outcome, RunOutcome::Halted(HaltReason::NoValidTransactions));
    }

    #[test]
    fn catalog_failure_degrades_to_unmatched_records() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "T1001|2024-01-05|P101|Widget|10|25.50|C200|North\n");
        let config = config(&dir, input);

        let outcome = run(&config, &FailingCatalog).unwrap();

        let summary = match outcome {
            RunOutcome::Completed(summary) => summary,
            other => panic!("expected completion, got {other:?}"),
        };
        assert_eq!(summary.enriched_matched, 0);
        assert_eq!(summary.enriched_total, 1);
    }

    #[test]
    fn missing_input_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir, dir.path().join("missing.txt"));

        let result = run(&config, &StubCatalog(Vec::new()));
        assert!(matches!(result, Err(SalesError::FileNotFound { .. })));
    }

    #[test]
    fn existing_enriched_file_is_reported_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let input = write_input(&dir, "T1001|2024-01-05|P101|Widget|10|25.50|C200|North\n");
        let config = config(&dir, input);
        std::fs::create_dir_all(config.enriched_path.parent().unwrap()).unwrap();
        std::fs::write(&config.enriched_path, "already here").unwrap();

        let outcome = run(&config, &StubCatalog(Vec::new())).unwrap();

        let summary = match outcome {
            RunOutcome::Completed(summary) => summary,
            other => panic!("expected completion, got {other:?}"),
        };
        assert_eq!(summary.enriched_write, WriteOutcome::SkippedExisting);
        assert_eq!(
            std::fs::read_to_string(&config.enriched_path).unwrap(),
            "already here"
        );
    }
}
