//! Text report rendering sink
//!
//! Consumes the validated and enriched transaction sets and renders the
//! human-readable sales report. All tables reuse the aggregates from
//! [`core::analytics`] rather than re-deriving them.
//!
//! [`core::analytics`]: crate::core::analytics

use crate::core::analytics::{
    customer_analysis, daily_sales_trend, find_peak_sales_day, region_wise_sales,
    top_selling_products, total_revenue,
};
use crate::types::{EnrichedTransaction, SalesError, Transaction};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::fmt::Write as _;
use std::path::Path;

const RULE: &str = "--------------------------------------------------";
const CURRENCY_SYMBOL: char = '₹';

/// Render the report and write it to `path`
///
/// Parent directories are created as needed. The generation timestamp is
/// the local wall clock.
///
/// # Errors
///
/// Returns [`SalesError::Io`] on directory creation or write failures.
pub fn generate_sales_report(
    transactions: &[Transaction],
    enriched: &[EnrichedTransaction],
    path: &Path,
) -> Result<(), SalesError> {
    let generated_on = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let report = render_report(transactions, enriched, &generated_on);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, report)?;
    Ok(())
}

/// Render the full report to a string
///
/// Pure with respect to its inputs; the caller supplies the generation
/// timestamp.
pub fn render_report(
    transactions: &[Transaction],
    enriched: &[EnrichedTransaction],
    generated_on: &str,
) -> String {
    let mut out = String::new();

    // Header
    let _ = writeln!(out, "{:>37}", "SALES REPORT");
    let _ = writeln!(out, "Generated on: {generated_on}");
    let _ = writeln!(out, "Total Transactions Analyzed: {}", transactions.len());
    let _ = writeln!(out, "==================================================");

    // Overall summary
    let revenue = total_revenue(transactions);
    let aggregable = transactions
        .iter()
        .filter(|t| t.amount().is_some())
        .count();
    let average_order = if aggregable > 0 {
        (revenue / Decimal::from(aggregable as u64)).round_dp(2)
    } else {
        Decimal::ZERO
    };

    let _ = writeln!(out, "\nOVERALL SUMMARY");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Total Revenue: {}", format_currency(revenue));
    let _ = writeln!(out, "Total Transactions: {aggregable}");
    let _ = writeln!(out, "Average Order Value: {}", format_currency(average_order));
    let _ = writeln!(out, "Date Range: {}", date_range(transactions));

    // Region breakdown
    let _ = writeln!(out, "\nREGION-WISE PERFORMANCE");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "{:<16}{:>16}{:>14}{:>16}",
        "Region", "Total Sales", "% of Total", "Transactions"
    );
    for region in region_wise_sales(transactions) {
        let _ = writeln!(
            out,
            "{:<16}{:>16}{:>13}%{:>16}",
            region.region,
            format_currency(region.total_sales),
            region.percentage_contribution,
            region.transaction_count
        );
    }

    // Top 5 products
    let _ = writeln!(out, "\nTOP 5 PRODUCTS");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "{:<24}{:>14}{:>16}",
        "Product Name", "Quantity Sold", "Revenue"
    );
    for product in top_selling_products(transactions, 5) {
        let _ = writeln!(
            out,
            "{:<24}{:>14}{:>16}",
            product.name,
            product.total_quantity,
            format_currency(product.total_sales)
        );
    }

    // Top 5 customers
    let _ = writeln!(out, "\nTOP 5 CUSTOMERS");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "{:<16}{:>16}{:>14}",
        "Customer ID", "Total Spent", "Orders"
    );
    for customer in customer_analysis(transactions).into_iter().take(5) {
        let _ = writeln!(
            out,
            "{:<16}{:>16}{:>14}",
            customer.customer_id,
            format_currency(customer.total_spent),
            customer.purchase_count
        );
    }

    // Daily trend
    let _ = writeln!(out, "\nDAILY SALES TREND");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "{:<14}{:>16}{:>15}{:>19}",
        "Date", "Revenue", "Transactions", "Unique Customers"
    );
    for day in daily_sales_trend(transactions) {
        let _ = writeln!(
            out,
            "{:<14}{:>16}{:>15}{:>19}",
            day.date,
            format_currency(day.total_revenue),
            day.transaction_count,
            day.unique_customers
        );
    }

    // Best selling day
    let _ = writeln!(out, "\nPRODUCT PERFORMANCE ANALYSIS");
    let _ = writeln!(out, "{RULE}");
    match find_peak_sales_day(transactions) {
        Some(peak) => {
            let _ = writeln!(
                out,
                "Best Selling Day: {} ({} transactions, {})",
                peak.date,
                peak.transaction_count,
                format_currency(peak.total_revenue.round_dp(2))
            );
        }
        None => {
            let _ = writeln!(out, "Best Selling Day: N/A");
        }
    }

    // Enrichment summary
    let matched = enriched.iter().filter(|e| e.api_match).count();
    let success_rate = if enriched.is_empty() {
        0.0
    } else {
        matched as f64 / enriched.len() as f64 * 100.0
    };
    let _ = writeln!(out, "\nAPI ENRICHMENT SUMMARY");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "Transactions Enriched: {matched} out of {}",
        enriched.len()
    );
    let _ = writeln!(out, "Enrichment Success Rate: {success_rate:.2}%");
    let _ = writeln!(out, "Transactions Not Enriched: {}", enriched.len() - matched);

    out
}

/// Format a monetary value: fixed symbol, 2 decimals, comma thousands
/// separators ("₹1,234,567.89")
fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let text = rounded.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let frac = format!("{frac_part:0<2}");

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{CURRENCY_SYMBOL}{grouped}.{frac}")
}

/// Calendar-aware min/max of the transaction dates, "N/A" when no date
/// parses
fn date_range(transactions: &[Transaction]) -> String {
    let mut min: Option<NaiveDate> = None;
    let mut max: Option<NaiveDate> = None;

    for txn in transactions {
        let Ok(date) = NaiveDate::parse_from_str(txn.date.trim(), "%Y-%m-%d") else {
            continue;
        };
        min = Some(min.map_or(date, |m| m.min(date)));
        max = Some(max.map_or(date, |m| m.max(date)));
    }

    match (min, max) {
        (Some(min), Some(max)) => format!("{min} to {max}"),
        _ => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn txn(date: &str, product: &str, quantity: i64, unit_price: &str) -> Transaction {
        Transaction {
            transaction_id: "T1".to_string(),
            date: date.to_string(),
            product_id: "P101".to_string(),
            product_name: product.to_string(),
            quantity,
            unit_price: dec(unit_price),
            customer_id: "C200".to_string(),
            region: "North".to_string(),
        }
    }

    fn enriched(txn: Transaction, matched: bool) -> EnrichedTransaction {
        EnrichedTransaction {
            transaction: txn,
            api_category: matched.then(|| "beauty".to_string()),
            api_brand: None,
            api_rating: matched.then_some(4.5),
            api_match: matched,
        }
    }

    #[rstest]
    #[case::small("255", "₹255.00")]
    #[case::two_decimals("255.5", "₹255.50")]
    #[case::thousands("12345.678", "₹12,345.68")]
    #[case::millions("1234567.89", "₹1,234,567.89")]
    #[case::exact_group("1000", "₹1,000.00")]
    #[case::negative("-1234.5", "-₹1,234.50")]
    #[case::zero("0", "₹0.00")]
    fn currency_formatting(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(format_currency(dec(input)), expected);
    }

    #[test]
    fn date_range_spans_min_to_max() {
        let set = vec![
            txn("2024-01-07", "Widget", 1, "1"),
            txn("2024-01-05", "Widget", 1, "1"),
            txn("not-a-date", "Widget", 1, "1"),
        ];
        assert_eq!(date_range(&set), "2024-01-05 to 2024-01-07");
    }

    #[test]
    fn date_range_is_na_when_nothing_parses() {
        let set = vec![txn("eventually", "Widget", 1, "1")];
        assert_eq!(date_range(&set), "N/A");
    }

    #[test]
    fn report_contains_every_required_section() {
        let transactions = vec![
            txn("2024-01-05", "Widget", 10, "25.50"),
            txn("2024-01-06", "Gadget", 1, "500.00"),
        ];
        let enriched_set = vec![
            enriched(transactions[0].clone(), true),
            enriched(transactions[1].clone(), false),
        ];

        let report = render_report(&transactions, &enriched_set, "2024-02-01 10:00:00");

        assert!(report.contains("SALES REPORT"));
        assert!(report.contains("Generated on: 2024-02-01 10:00:00"));
        assert!(report.contains("Total Transactions Analyzed: 2"));
        assert!(report.contains("OVERALL SUMMARY"));
        assert!(report.contains("Total Revenue: ₹755.00"));
        assert!(report.contains("Average Order Value: ₹377.50"));
        assert!(report.contains("Date Range: 2024-01-05 to 2024-01-06"));
        assert!(report.contains("REGION-WISE PERFORMANCE"));
        assert!(report.contains("TOP 5 PRODUCTS"));
        assert!(report.contains("TOP 5 CUSTOMERS"));
        assert!(report.contains("DAILY SALES TREND"));
        assert!(report.contains("Best Selling Day: 2024-01-06 (1 transactions, ₹500.00)"));
        assert!(report.contains("API ENRICHMENT SUMMARY"));
        assert!(report.contains("Transactions Enriched: 1 out of 2"));
        assert!(report.contains("Enrichment Success Rate: 50.00%"));
        assert!(report.contains("Transactions Not Enriched: 1"));
    }

    #[test]
    fn empty_input_renders_na_placeholders() {
        let report = render_report(&[], &[], "2024-02-01 10:00:00");

        assert!(report.contains("Total Revenue: ₹0.00"));
        assert!(report.contains("Date Range: N/A"));
        assert!(report.contains("Best Selling Day: N/A"));
        assert!(report.contains("Enrichment Success Rate: 0.00%"));
    }

    #[test]
    fn generate_writes_the_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output/sales_report.txt");
        let transactions = vec![txn("2024-01-05", "Widget", 10, "25.50")];
        let enriched_set = vec![enriched(transactions[0].clone(), true)];

        generate_sales_report(&transactions, &enriched_set, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("SALES REPORT"));
    }
}
