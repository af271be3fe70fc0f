//! The API endpoints URIs.

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
/// The route for a page of transactions, optionally filtered by a search term.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for a month's total sales and sold/unsold counts.
pub const STATISTICS_API: &str = "/api/statistics";
/// The route for a month's price-range histogram.
pub const BAR_CHART_API: &str = "/api/barchart";
/// The route for a month's category breakdown.
pub const PIE_CHART_API: &str = "/api/piechart";
/// The route for all of a month's reports in one response.
pub const COMBINED_API: &str = "/api/combined";
/// The route that replaces all transactions with the seed data.
pub const INITIALIZE_API: &str = "/api/initialize";
