//! Defines the route handler for listing transactions a page at a time.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    pagination::{Page, PaginationConfig},
};

use super::{core::Transaction, query::search_transactions};

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls default page sizes.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters for the transaction listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsQuery {
    /// The 1-based page number.
    pub page: Option<u64>,
    /// The maximum number of transactions on a page.
    pub per_page: Option<u64>,
    /// Only include transactions whose title, description or price contain this text.
    pub search: Option<String>,
}

/// Get a page of transactions from the whole collection.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let page = Page::new(query.page, query.per_page, &state.pagination_config)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = search_transactions(query.search.as_deref(), page, &connection)
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    Ok(Json(transactions))
}
