//! Monthly report calculations.
//!
//! Each report is a pure function over the transactions of one month, so the
//! combined report can run all three over the same fetched slice.

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::transaction::Transaction;

/// Price histogram buckets as (label, inclusive upper bound), in display order.
///
/// A price belongs to the first bucket whose upper bound is at least the price.
const PRICE_BUCKETS: [(&str, f64); 10] = [
    ("0-100", 100.0),
    ("101-200", 200.0),
    ("201-300", 300.0),
    ("301-400", 400.0),
    ("401-500", 500.0),
    ("501-600", 600.0),
    ("601-700", 700.0),
    ("701-800", 800.0),
    ("801-900", 900.0),
    ("901-above", f64::INFINITY),
];

/// Sales totals for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatistics {
    /// The sum of the prices of all transactions in the month.
    pub total_sales: f64,
    /// The number of transactions that sold.
    pub sold_items: u64,
    /// The number of transactions that did not sell.
    pub not_sold_items: u64,
}

/// The number of transactions in one price range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRangeCount {
    /// The label of the range, e.g. "101-200".
    pub range: &'static str,
    /// How many transactions fall in the range.
    pub count: u64,
}

/// Transaction counts per category, in order of first appearance.
///
/// Serializes as a JSON object from category to count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    counts: Vec<(String, u64)>,
}

impl CategoryBreakdown {
    fn increment(&mut self, category: &str) {
        match self.counts.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((category.to_owned(), 1)),
        }
    }

    /// The number of transactions in `category`, if any.
    pub fn get(&self, category: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
    }

    /// The categories and their counts in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl Serialize for CategoryBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;

        for (category, count) in &self.counts {
            map.serialize_entry(category, count)?;
        }

        map.end()
    }
}

/// All three monthly reports, computed from the same transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    /// See [monthly_statistics].
    pub statistics: MonthlyStatistics,
    /// See [price_histogram].
    pub bar_chart_data: Vec<PriceRangeCount>,
    /// See [category_breakdown].
    pub pie_chart_data: CategoryBreakdown,
}

/// Sums the prices and counts sold and unsold transactions.
pub(super) fn monthly_statistics(transactions: &[Transaction]) -> MonthlyStatistics {
    let total_sales = transactions.iter().map(|t| t.price).sum();
    let sold_items = transactions.iter().filter(|t| t.sold).count() as u64;

    MonthlyStatistics {
        total_sales,
        sold_items,
        not_sold_items: transactions.len() as u64 - sold_items,
    }
}

/// Counts transactions per price range.
///
/// Always returns every bucket in [PRICE_BUCKETS] order, including empty ones.
/// Prices on a boundary go to the lower bucket (100 is in "0-100"), and zero or
/// negative prices go to the first bucket.
pub(super) fn price_histogram(transactions: &[Transaction]) -> Vec<PriceRangeCount> {
    let counts = transactions
        .iter()
        .fold([0_u64; PRICE_BUCKETS.len()], |mut counts, transaction| {
            counts[price_bucket_index(transaction.price)] += 1;
            counts
        });

    PRICE_BUCKETS
        .iter()
        .zip(counts)
        .map(|(&(range, _), count)| PriceRangeCount { range, count })
        .collect()
}

fn price_bucket_index(price: f64) -> usize {
    PRICE_BUCKETS
        .iter()
        .position(|(_, upper_bound)| price <= *upper_bound)
        // Only NaN fails every comparison.
        .unwrap_or(PRICE_BUCKETS.len() - 1)
}

/// Counts transactions per category. Empty category names are kept.
pub(super) fn category_breakdown(transactions: &[Transaction]) -> CategoryBreakdown {
    transactions
        .iter()
        .fold(CategoryBreakdown::default(), |mut breakdown, transaction| {
            breakdown.increment(&transaction.category);
            breakdown
        })
}

/// Runs all three reports over one snapshot of a month's transactions.
pub(super) fn combined_report(transactions: &[Transaction]) -> CombinedReport {
    CombinedReport {
        statistics: monthly_statistics(transactions),
        bar_chart_data: price_histogram(transactions),
        pie_chart_data: category_breakdown(transactions),
    }
}
