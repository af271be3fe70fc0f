//! Dashboard module
//!
//! Provides the monthly reports behind the dashboard charts: summary
//! statistics, a price-range histogram and a category breakdown.

mod aggregation;
mod handlers;
mod month;
mod transaction;

pub use handlers::{get_bar_chart, get_combined, get_pie_chart, get_statistics};
