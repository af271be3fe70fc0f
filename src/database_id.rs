//! Database ID type definition.

/// Alias for the integer type used for transaction IDs.
///
/// IDs come from the seed data rather than being generated by the database.
pub type TransactionId = i64;
