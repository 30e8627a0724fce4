//! Sales Analytics Engine CLI
//!
//! Command-line interface for analyzing pipe-delimited sales data files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- data/sales_data.txt
//! cargo run -- --region North --min-amount 100 data/sales_data.txt
//! cargo run -- --offline --report-out /tmp/report.txt data/sales_data.txt
//! ```
//!
//! The program parses and validates the input file, computes the sales
//! aggregates, enriches the transactions from the product catalog API,
//! and writes the enriched data file and the text report.
//!
//! # Exit Codes
//!
//! - 0: Success (including early halts on empty data)
//! - 1: Error (file not found, write failure, etc.)

use sales_analytics_engine::cli;
use sales_analytics_engine::io::catalog::{CatalogSource, HttpCatalog, OfflineCatalog};
use sales_analytics_engine::io::enriched_writer::WriteOutcome;
use sales_analytics_engine::pipeline::{self, RunOutcome};
use std::process;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;

fn main() {
    let args = cli::parse_args();

    setup_logging(parse_log_level(&args.log_level));

    let config = args.to_pipeline_config();

    // Select the catalog source: real HTTP fetch, or nothing in offline mode
    let catalog: Box<dyn CatalogSource> = if args.offline {
        Box::new(OfflineCatalog)
    } else {
        Box::new(HttpCatalog::new(args.catalog_url.clone()))
    };

    match pipeline::run(&config, catalog.as_ref()) {
        Ok(RunOutcome::Completed(summary)) => {
            println!("Process complete.");
            println!(
                "  Parsed {} records, {} valid after filtering ({} invalid, {} filtered)",
                summary.parsed,
                summary.filter_summary.final_count,
                summary.filter_summary.invalid,
                summary.filter_summary.filtered_by_region + summary.filter_summary.filtered_by_amount,
            );
            println!("  Total revenue: {}", summary.total_revenue);
            println!(
                "  Enriched {}/{} transactions",
                summary.enriched_matched, summary.enriched_total
            );
            match summary.enriched_write {
                WriteOutcome::Written(_) => {
                    println!("  Enriched data: {}", config.enriched_path.display());
                }
                WriteOutcome::SkippedExisting => {
                    println!(
                        "  Enriched data: {} (already existed, not overwritten)",
                        config.enriched_path.display()
                    );
                }
            }
            println!("  Sales report: {}", config.report_path.display());
        }
        Ok(RunOutcome::Halted(reason)) => {
            println!("Nothing to report: {reason}.");
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    // Report output goes to stdout; logging stays on stderr
    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}
