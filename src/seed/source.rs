//! Reading seed transactions from their JSON source.

use crate::{Error, transaction::Transaction};

/// The seed data the dashboard was built around.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Parse a JSON array of transactions.
///
/// Each element needs the fields of [Transaction] in camelCase, with
/// `dateOfSale` as an RFC 3339 date-time. Unknown fields are ignored.
///
/// # Errors
/// Returns an [Error::SeedFormat] if `bytes` is not a JSON array of transactions.
pub fn parse_seed(bytes: &[u8]) -> Result<Vec<Transaction>, Error> {
    serde_json::from_slice(bytes).map_err(|error| Error::SeedFormat(error.to_string()))
}

/// Download and parse the seed transactions at `url`.
///
/// # Errors
/// Returns an:
/// - [Error::SeedFetch] if the request fails or the server responds with a non-success status,
/// - or [Error::SeedFormat] if the response body is not a JSON array of transactions.
pub async fn fetch_seed(client: &reqwest::Client, url: &str) -> Result<Vec<Transaction>, Error> {
    let response = client
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|error| {
            tracing::error!("could not fetch seed data from {url}: {error}");
            Error::SeedFetch(error.to_string())
        })?;

    let body = response.bytes().await.map_err(|error| {
        tracing::error!("could not read seed data from {url}: {error}");
        Error::SeedFetch(error.to_string())
    })?;

    tracing::debug!("downloaded {} bytes of seed data from {url}", body.len());

    parse_seed(&body)
}
