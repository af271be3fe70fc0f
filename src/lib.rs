//! A backend for a sales transaction dashboard.
//!
//! The server stores product sale transactions in SQLite and exposes a small
//! JSON API: a paginated, searchable listing of transactions and monthly
//! reports (summary statistics, a price-range histogram and a category
//! breakdown). The collection is populated from a JSON seed source.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod config;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod error;
mod logging;
mod not_found;
mod pagination;
mod routing;
mod seed;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use config::{DEFAULT_REFERENCE_YEAR, DEFAULT_TIMEZONE, DashboardConfig};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::{MAX_PAGE_SIZE, PaginationConfig};
pub use routing::build_router;
pub use seed::{DEFAULT_SEED_URL, fetch_seed, parse_seed, replace_all_transactions};
pub use transaction::Transaction;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
