//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    AppState,
    dashboard::{get_bar_chart, get_combined, get_pie_chart, get_statistics},
    endpoints,
    not_found::get_404_not_found,
    seed::initialize_endpoint,
    transaction::list_transactions_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::TRANSACTIONS_API, get(list_transactions_endpoint))
        .route(endpoints::STATISTICS_API, get(get_statistics))
        .route(endpoints::BAR_CHART_API, get(get_bar_chart))
        .route(endpoints::PIE_CHART_API, get(get_pie_chart))
        .route(endpoints::COMBINED_API, get(get_combined))
        .route(endpoints::INITIALIZE_API, post(initialize_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, "I'm a teapot").into_response()
}
