//! Monthly report HTTP handlers.
//!
//! Every handler resolves the month, fetches that month's transactions once
//! while holding the database lock, then releases the lock before running the
//! report calculations.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{
            CategoryBreakdown, CombinedReport, MonthlyStatistics, PriceRangeCount,
            category_breakdown, combined_report, monthly_statistics, price_histogram,
        },
        month::{MonthQuery, MonthSelection},
        transaction::get_transactions_in_range,
    },
    transaction::Transaction,
};

/// The state needed for the monthly reports.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The year to use when a query only names a month.
    pub reference_year: i32,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            reference_year: state.dashboard_config.reference_year,
            local_timezone: state.dashboard_config.local_timezone.clone(),
        }
    }
}

/// Fetches a snapshot of the transactions in the queried month.
///
/// # Errors
/// Returns an error if the month is invalid, the timezone is invalid, the
/// database lock is poisoned, or the query fails.
fn get_month_transactions(
    state: &DashboardState,
    query: &MonthQuery,
) -> Result<Vec<Transaction>, Error> {
    let month = MonthSelection::from_query(query, state.reference_year)?;
    let range = month.instant_range(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_transactions_in_range(range, &connection)
        .inspect_err(|error| tracing::error!("could not get transactions for month: {error}"))
}

/// Get the total sales and the number of sold and unsold items in a month.
pub async fn get_statistics(
    State(state): State<DashboardState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthlyStatistics>, Error> {
    let transactions = get_month_transactions(&state, &query)?;

    Ok(Json(monthly_statistics(&transactions)))
}

/// Get the number of items in each price range in a month.
pub async fn get_bar_chart(
    State(state): State<DashboardState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<PriceRangeCount>>, Error> {
    let transactions = get_month_transactions(&state, &query)?;

    Ok(Json(price_histogram(&transactions)))
}

/// Get the number of items in each category in a month.
pub async fn get_pie_chart(
    State(state): State<DashboardState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CategoryBreakdown>, Error> {
    let transactions = get_month_transactions(&state, &query)?;

    Ok(Json(category_breakdown(&transactions)))
}

/// Get the statistics, bar chart and pie chart data for a month in one response.
pub async fn get_combined(
    State(state): State<DashboardState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CombinedReport>, Error> {
    let transactions = get_month_transactions(&state, &query)?;

    Ok(Json(combined_report(&transactions)))
}
