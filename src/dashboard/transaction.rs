//! Database queries for retrieving the transactions in a reporting month.

use std::ops::Range;

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    transaction::{TRANSACTION_COLUMNS, Transaction, map_transaction_row},
};

/// Gets the transactions sold within a half-open range of instants.
///
/// A transaction at exactly `range.end` belongs to the next range, so
/// consecutive months never share a transaction.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub(super) fn get_transactions_in_range(
    range: Range<OffsetDateTime>,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let query = format!(
        "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" \
        WHERE date_of_sale >= ?1 AND date_of_sale < ?2 \
        ORDER BY id ASC"
    );

    connection
        .prepare(&query)?
        .query_map(
            (range.start.unix_timestamp(), range.end.unix_timestamp()),
            map_transaction_row,
        )?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}
