//! Replacing the stored transactions with seed data.

use rusqlite::Connection;

use crate::{
    Error,
    transaction::{Transaction, insert_transaction},
};

/// Delete every stored transaction and insert `transactions` in their place.
///
/// Runs in a single SQL transaction, so if any insert fails (e.g. a duplicate
/// ID) the previously stored transactions are left untouched.
///
/// Returns the number of transactions inserted.
///
/// # Errors
/// Returns an [Error::SqlError] if the delete, an insert or the commit fails.
pub fn replace_all_transactions(
    transactions: &[Transaction],
    connection: &Connection,
) -> Result<usize, Error> {
    let tx = connection.unchecked_transaction()?;

    let deleted = tx.execute("DELETE FROM \"transaction\"", ())?;
    tracing::debug!("deleted {deleted} transactions before seeding");

    for transaction in transactions {
        insert_transaction(transaction, &tx)?;
    }

    tx.commit()?;

    Ok(transactions.len())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        db::initialize,
        transaction::{Transaction, count_transactions, insert_transaction},
    };

    use super::replace_all_transactions;

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn test_transaction(id: i64) -> Transaction {
        Transaction {
            id,
            title: format!("Product {id}"),
            price: 12.5,
            description: String::new(),
            category: "electronics".to_owned(),
            image: String::new(),
            sold: false,
            date_of_sale: datetime!(2022-06-01 10:00 UTC),
        }
    }

    #[test]
    fn replaces_existing_transactions() {
        let conn = get_test_connection();
        for id in 100..110 {
            insert_transaction(&test_transaction(id), &conn).unwrap();
        }
        let seed: Vec<_> = (1..=3).map(test_transaction).collect();

        let inserted = replace_all_transactions(&seed, &conn).unwrap();

        assert_eq!(inserted, 3);
        assert_eq!(count_transactions(&conn).unwrap(), 3);
        let max_id: i64 = conn
            .query_row("SELECT MAX(id) FROM \"transaction\"", [], |row| row.get(0))
            .unwrap();
        assert_eq!(max_id, 3);
    }

    #[test]
    fn running_twice_does_not_duplicate() {
        let conn = get_test_connection();
        let seed: Vec<_> = (1..=3).map(test_transaction).collect();

        replace_all_transactions(&seed, &conn).unwrap();
        replace_all_transactions(&seed, &conn).unwrap();

        assert_eq!(count_transactions(&conn).unwrap(), 3);
    }

    #[test]
    fn failed_seed_keeps_previous_transactions() {
        let conn = get_test_connection();
        insert_transaction(&test_transaction(42), &conn).unwrap();
        let seed = vec![test_transaction(1), test_transaction(1)];

        let result = replace_all_transactions(&seed, &conn);

        assert!(matches!(result, Err(Error::SqlError(_))));
        assert_eq!(count_transactions(&conn).unwrap(), 1);
    }
}
