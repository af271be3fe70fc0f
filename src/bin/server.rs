use std::{
    error::Error,
    fs::OpenOptions,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    http::{Method, header::CONTENT_TYPE},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{
    EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt,
};

use sales_dashboard::{
    AppState, DEFAULT_REFERENCE_YEAR, DEFAULT_SEED_URL, DEFAULT_TIMEZONE, DashboardConfig,
    MAX_PAGE_SIZE, PaginationConfig, build_router, graceful_shutdown, logging_middleware,
};

/// The REST API server for the sales dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database.
    #[arg(long)]
    db_path: String,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The address to serve the API from.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    host: IpAddr,

    /// Where `POST /api/initialize` downloads the seed transactions from.
    #[arg(long, default_value = DEFAULT_SEED_URL)]
    seed_url: String,

    /// The year to use for report queries that only give a month.
    #[arg(long, default_value_t = DEFAULT_REFERENCE_YEAR)]
    reference_year: i32,

    /// The canonical timezone month boundaries are computed in, e.g. "Pacific/Auckland".
    #[arg(long, default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    /// The number of transactions on a page when a request does not say.
    #[arg(
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=MAX_PAGE_SIZE)
    )]
    page_size: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging()?;

    let args = Args::parse();

    let addr = SocketAddr::new(args.host, args.port);

    let conn = Connection::open(&args.db_path)?;
    let app_state = AppState::new(
        conn,
        DashboardConfig {
            reference_year: args.reference_year,
            local_timezone: args.timezone,
            seed_url: args.seed_url,
        },
        PaginationConfig {
            default_page_size: args.page_size,
            ..Default::default()
        },
    )?;

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(app_state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router).layer(cors_layer());

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}

fn setup_logging() -> Result<(), Box<dyn Error>> {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(env_filter),
        )
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}

/// The dashboard client is served from a different origin.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;

    fn parse(page_size: &str) -> Result<Args, clap::Error> {
        Args::try_parse_from(["server", "--db-path", "test.db", "--page-size", page_size])
    }

    #[test]
    fn page_size_defaults_to_ten() {
        let args = Args::try_parse_from(["server", "--db-path", "test.db"]).unwrap();

        assert_eq!(args.page_size, 10);
    }

    #[test]
    fn accepts_page_sizes_up_to_max() {
        assert_eq!(parse("1").unwrap().page_size, 1);
        assert_eq!(parse("100").unwrap().page_size, 100);
    }

    #[test]
    fn rejects_page_sizes_out_of_range() {
        for page_size in ["0", "101", "150", "-1"] {
            assert!(
                parse(page_size).is_err(),
                "want --page-size {page_size} to be rejected"
            );
        }
    }
}
