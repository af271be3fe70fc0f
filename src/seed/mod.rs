//! Seeding the transaction store.
//!
//! Seed data is a JSON array of transactions, downloaded from a configurable
//! URL by `POST /api/initialize` or read from a file by the `seed_db` binary.
//! Seeding replaces every stored transaction.

mod initialize_endpoint;
mod source;
mod store;

pub use initialize_endpoint::initialize_endpoint;
pub use source::{DEFAULT_SEED_URL, fetch_seed, parse_seed};
pub use store::replace_all_transactions;
