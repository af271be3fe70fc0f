//! Sets up the application database.

use rusqlite::Connection;

use crate::{
    Error,
    transaction::{create_transaction_table, register_search_functions},
};

/// Create the tables for the domain models if they do not already exist, and
/// register the SQL functions queries rely on with `connection`.
///
/// # Errors
/// Returns an [Error::SqlError] if a table cannot be created or a function
/// cannot be registered.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    create_transaction_table(connection)?;
    register_search_functions(connection)?;

    Ok(())
}
