//! Sales aggregation
//!
//! The seven aggregate views computed over the validated/filtered
//! transaction set. Every function is a pure pass over `&[Transaction]`
//! and shares one defensive step: a record only contributes through
//! [`Transaction::amount`], which yields `None` for non-positive
//! quantity or price. The validator already guarantees positivity, but
//! the guard keeps a caller that skips validation from corrupting any
//! aggregate.
//!
//! Ordering rules:
//! - value-ranked views (regions, products, customers) sort descending
//!   with a stable sort, so ties keep first-seen input order
//! - date views group in a `BTreeMap`, so output is in ascending lexical
//!   date order and the peak-day scan resolves revenue ties to the
//!   earliest date

use crate::types::Transaction;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Per-region sales aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionStats {
    pub region: String,
    /// Total sales for the region, rounded to 2 decimal places
    pub total_sales: Decimal,
    pub transaction_count: usize,
    /// Share of the grand total as a percentage, rounded to 2 decimal
    /// places; zero when the grand total is zero
    pub percentage_contribution: Decimal,
}

/// Per-product sales aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductStats {
    pub name: String,
    pub total_quantity: i64,
    /// Total sales for the product, rounded to 2 decimal places
    pub total_sales: Decimal,
}

/// Per-customer purchase aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerStats {
    pub customer_id: String,
    /// Total spent, rounded to 2 decimal places
    pub total_spent: Decimal,
    pub purchase_count: usize,
    /// total spent / purchase count, rounded to 2 decimal places
    pub average_order_value: Decimal,
    /// Number of distinct product names purchased
    pub unique_products: usize,
}

/// Per-date sales aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyStats {
    pub date: String,
    /// Total revenue for the day, rounded to 2 decimal places
    pub total_revenue: Decimal,
    pub transaction_count: usize,
    /// Distinct customer IDs for the day; empty IDs are excluded from
    /// the distinct set but their transactions still count
    pub unique_customers: usize,
}

/// The single highest-revenue day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeakDay {
    pub date: String,
    pub transaction_count: usize,
    pub total_revenue: Decimal,
}

/// Sum of all sale amounts, rounded to 2 decimal places
pub fn total_revenue(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter_map(Transaction::amount)
        .sum::<Decimal>()
        .round_dp(2)
}

/// Per-region totals, counts, and percentage contributions
///
/// Ordered by total sales descending; ties keep first-seen order.
pub fn region_wise_sales(transactions: &[Transaction]) -> Vec<RegionStats> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<RegionStats> = Vec::new();
    let mut grand_total = Decimal::ZERO;

    for txn in transactions {
        let Some(amount) = txn.amount() else { continue };
        grand_total += amount;

        let region = txn.region.trim().to_string();
        let i = *index.entry(region.clone()).or_insert_with(|| {
            rows.push(RegionStats {
                region,
                total_sales: Decimal::ZERO,
                transaction_count: 0,
                percentage_contribution: Decimal::ZERO,
            });
            rows.len() - 1
        });
        rows[i].total_sales += amount;
        rows[i].transaction_count += 1;
    }

    for row in &mut rows {
        row.percentage_contribution = if grand_total > Decimal::ZERO {
            (row.total_sales / grand_total * Decimal::ONE_HUNDRED).round_dp(2)
        } else {
            Decimal::ZERO
        };
        row.total_sales = row.total_sales.round_dp(2);
    }

    rows.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
    rows
}

/// Top `top_n` products by total sales, descending
pub fn top_selling_products(transactions: &[Transaction], top_n: usize) -> Vec<ProductStats> {
    let mut products = aggregate_products(transactions);
    products.sort_by(|a, b| b.total_sales.cmp(&a.total_sales));
    products.truncate(top_n);
    products
}

/// Products whose total quantity sold is strictly below `threshold`
///
/// Ordered by total quantity ascending.
pub fn low_performing_products(transactions: &[Transaction], threshold: i64) -> Vec<ProductStats> {
    let mut products = aggregate_products(transactions);
    products.retain(|p| p.total_quantity < threshold);
    products.sort_by_key(|p| p.total_quantity);
    products
}

/// Shared per-product accumulation for top sellers and low performers
fn aggregate_products(transactions: &[Transaction]) -> Vec<ProductStats> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<ProductStats> = Vec::new();

    for txn in transactions {
        let Some(amount) = txn.amount() else { continue };

        let name = txn.product_name.trim().to_string();
        let i = *index.entry(name.clone()).or_insert_with(|| {
            rows.push(ProductStats {
                name,
                total_quantity: 0,
                total_sales: Decimal::ZERO,
            });
            rows.len() - 1
        });
        rows[i].total_quantity += txn.quantity;
        rows[i].total_sales += amount;
    }

    for row in &mut rows {
        row.total_sales = row.total_sales.round_dp(2);
    }
    rows
}

/// Per-customer spend, order count, average order value, and distinct
/// product count
///
/// Ordered by total spent descending; ties keep first-seen order.
pub fn customer_analysis(transactions: &[Transaction]) -> Vec<CustomerStats> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<CustomerStats> = Vec::new();
    let mut products_bought: Vec<HashSet<String>> = Vec::new();

    for txn in transactions {
        let Some(amount) = txn.amount() else { continue };

        let customer_id = txn.customer_id.trim().to_string();
        let i = *index.entry(customer_id.clone()).or_insert_with(|| {
            rows.push(CustomerStats {
                customer_id,
                total_spent: Decimal::ZERO,
                purchase_count: 0,
                average_order_value: Decimal::ZERO,
                unique_products: 0,
            });
            products_bought.push(HashSet::new());
            rows.len() - 1
        });
        rows[i].total_spent += amount;
        rows[i].purchase_count += 1;
        products_bought[i].insert(txn.product_name.trim().to_string());
    }

    for (row, products) in rows.iter_mut().zip(&products_bought) {
        row.average_order_value = if row.purchase_count > 0 {
            (row.total_spent / Decimal::from(row.purchase_count as u64)).round_dp(2)
        } else {
            Decimal::ZERO
        };
        row.total_spent = row.total_spent.round_dp(2);
        row.unique_products = products.len();
    }

    rows.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
    rows
}

#[derive(Default)]
struct DailyAccum {
    revenue: Decimal,
    transaction_count: usize,
    customers: HashSet<String>,
}

fn aggregate_by_date(transactions: &[Transaction]) -> BTreeMap<String, DailyAccum> {
    let mut daily: BTreeMap<String, DailyAccum> = BTreeMap::new();

    for txn in transactions {
        let Some(amount) = txn.amount() else { continue };

        let entry = daily.entry(txn.date.trim().to_string()).or_default();
        entry.revenue += amount;
        entry.transaction_count += 1;
        let customer_id = txn.customer_id.trim();
        if !customer_id.is_empty() {
            entry.customers.insert(customer_id.to_string());
        }
    }

    daily
}

/// Per-date revenue, transaction count, and distinct customer count
///
/// Ordered by date string ascending (lexical, not calendar-aware).
pub fn daily_sales_trend(transactions: &[Transaction]) -> Vec<DailyStats> {
    aggregate_by_date(transactions)
        .into_iter()
        .map(|(date, accum)| DailyStats {
            date,
            total_revenue: accum.revenue.round_dp(2),
            transaction_count: accum.transaction_count,
            unique_customers: accum.customers.len(),
        })
        .collect()
}

/// The date with the single highest total revenue
///
/// Returns `None` when there is no aggregable data. Revenue ties resolve
/// to the earliest date (the map iterates in ascending date order and
/// only a strictly greater revenue displaces the current peak).
pub fn find_peak_sales_day(transactions: &[Transaction]) -> Option<PeakDay> {
    let mut peak: Option<PeakDay> = None;

    for (date, accum) in aggregate_by_date(transactions) {
        let is_new_peak = peak
            .as_ref()
            .map(|p| accum.revenue > p.total_revenue)
            .unwrap_or(true);
        if is_new_peak {
            peak = Some(PeakDay {
                date,
                transaction_count: accum.transaction_count,
                total_revenue: accum.revenue,
            });
        }
    }

    peak
}
