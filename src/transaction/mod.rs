//! Sale transactions.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model
//! - Database functions for storing and querying transactions
//! - The route handler for the paginated, searchable transaction listing

mod core;
mod list_endpoint;
mod query;

pub(crate) use core::TRANSACTION_COLUMNS;
pub(crate) use query::register_search_functions;
pub use core::{Transaction, create_transaction_table, insert_transaction, map_transaction_row};
pub use list_endpoint::list_transactions_endpoint;

#[cfg(test)]
pub use core::count_transactions;
