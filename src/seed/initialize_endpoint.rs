//! Defines the route handler that replaces the stored transactions with seed data.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error};

use super::{source::fetch_seed, store::replace_all_transactions};

/// The state needed for seeding the database.
#[derive(Debug, Clone)]
pub struct SeedState {
    /// The database connection the seed data is written to.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The client used to download the seed data.
    pub http_client: reqwest::Client,
    /// Where the seed data is downloaded from.
    pub seed_url: String,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            http_client: state.http_client.clone(),
            seed_url: state.dashboard_config.seed_url.clone(),
        }
    }
}

/// Download the seed data and replace every stored transaction with it.
///
/// Responds with a plain-text confirmation, or a 500 with the reason on failure.
/// When the download or the write fails the stored transactions are left as they were.
pub async fn initialize_endpoint(State(state): State<SeedState>) -> Response {
    match seed_database(&state).await {
        Ok(count) => {
            tracing::info!("seeded the database with {count} transactions");
            "Database initialized successfully with seed data.".into_response()
        }
        Err(error) => {
            tracing::error!("could not seed the database: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error initializing database: {error}"),
            )
                .into_response()
        }
    }
}

async fn seed_database(state: &SeedState) -> Result<usize, Error> {
    // Download first so the lock is not held across the request.
    let transactions = fetch_seed(&state.http_client, &state.seed_url).await?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    replace_all_transactions(&transactions, &connection)
}
