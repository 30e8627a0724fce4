use crate::core::validator::FilterOptions;
use crate::io::catalog::DEFAULT_CATALOG_URL;
use crate::pipeline::PipelineConfig;
use clap::Parser;
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Analyze pipe-delimited sales data and produce an enriched data file
/// plus a text report
#[derive(Parser, Debug)]
#[command(name = "sales-analytics")]
#[command(about = "Analyze sales transactions, enrich them from a product catalog, and generate a report", long_about = None)]
pub struct CliArgs {
    /// Input sales data file (pipe-delimited, header line first)
    #[arg(value_name = "INPUT", help = "Path to the pipe-delimited sales data file")]
    pub input_file: PathBuf,

    /// Only keep transactions from this region (case-insensitive match)
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Only keep transactions with amount >= this value (inclusive)
    #[arg(long, value_name = "AMOUNT")]
    pub min_amount: Option<Decimal>,

    /// Only keep transactions with amount <= this value (inclusive)
    #[arg(long, value_name = "AMOUNT")]
    pub max_amount: Option<Decimal>,

    /// Number of products in the top-sellers table
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub top_n: usize,

    /// Quantity threshold for the low-performers view
    #[arg(long, value_name = "QUANTITY", default_value_t = 100)]
    pub low_threshold: i64,

    /// Target path for the enriched data file (never overwritten)
    #[arg(long, value_name = "PATH", default_value = "data/enriched_sales_data.txt")]
    pub enriched_out: PathBuf,

    /// Target path for the text report
    #[arg(long, value_name = "PATH", default_value = "output/sales_report.txt")]
    pub report_out: PathBuf,

    /// Product catalog endpoint
    #[arg(long, value_name = "URL", default_value = DEFAULT_CATALOG_URL)]
    pub catalog_url: String,

    /// Skip the catalog fetch entirely; all records come out unmatched
    #[arg(long)]
    pub offline: bool,

    /// Log level: error, warn, info, debug, or trace
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

impl CliArgs {
    /// Assemble the filter options from the CLI flags
    pub fn to_filter_options(&self) -> FilterOptions {
        FilterOptions {
            region: self.region.clone(),
            min_amount: self.min_amount,
            max_amount: self.max_amount,
        }
    }

    /// Assemble the full pipeline configuration from the CLI flags
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            input: self.input_file.clone(),
            filters: self.to_filter_options(),
            top_n: self.top_n,
            low_threshold: self.low_threshold,
            enriched_path: self.enriched_out.clone(),
            report_path: self.report_out.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[test]
    fn defaults_are_applied() {
        let args = CliArgs::try_parse_from(["program", "sales.txt"]).unwrap();

        assert_eq!(args.input_file, PathBuf::from("sales.txt"));
        assert_eq!(args.region, None);
        assert_eq!(args.min_amount, None);
        assert_eq!(args.max_amount, None);
        assert_eq!(args.top_n, 5);
        assert_eq!(args.low_threshold, 100);
        assert_eq!(
            args.enriched_out,
            PathBuf::from("data/enriched_sales_data.txt")
        );
        assert_eq!(args.report_out, PathBuf::from("output/sales_report.txt"));
        assert_eq!(args.catalog_url, DEFAULT_CATALOG_URL);
        assert!(!args.offline);
        assert_eq!(args.log_level, "info");
    }

    #[rstest]
    #[case::region(&["program", "--region", "North", "sales.txt"])]
    #[case::amounts(&["program", "--min-amount", "100", "--max-amount", "500.50", "sales.txt"])]
    #[case::offline(&["program", "--offline", "sales.txt"])]
    fn flag_combinations_parse(#[case] argv: &[&str]) {
        assert!(CliArgs::try_parse_from(argv).is_ok());
    }

    #[test]
    fn filter_options_carry_the_flags() {
        let args = CliArgs::try_parse_from([
            "program",
            "--region",
            "north",
            "--min-amount",
            "100",
            "--max-amount",
            "500.50",
            "sales.txt",
        ])
        .unwrap();

        let filters = args.to_filter_options();
        assert_eq!(filters.region.as_deref(), Some("north"));
        assert_eq!(filters.min_amount, Some(Decimal::from(100)));
        assert_eq!(filters.max_amount, Some(Decimal::from_str("500.50").unwrap()));
    }

    #[rstest]
    #[case::missing_input(&["program"][..])]
    #[case::bad_min_amount(&["program", "--min-amount", "lots", "sales.txt"][..])]
    #[case::bad_top_n(&["program", "--top-n", "five", "sales.txt"][..])]
    fn parsing_errors(#[case] argv: &[&str]) {
        assert!(CliArgs::try_parse_from(argv).is_err());
    }
}
