//! Database query helpers for the transaction listing.

use rusqlite::{Connection, functions::FunctionFlags, params_from_iter, types::Value};

use crate::{Error, pagination::Page};

use super::core::{TRANSACTION_COLUMNS, Transaction, map_transaction_row};

/// The SQL function that lowercases text, including non-ASCII letters.
///
/// SQLite's built-in `lower` and `LIKE` only fold ASCII letters.
const UNICODE_LOWER: &str = "unicode_lower";

/// Register the SQL functions [search_transactions] needs on `connection`.
///
/// Functions live on the connection, so this must run for every connection
/// that is searched.
///
/// # Errors
/// Returns an error if SQLite rejects the function.
pub(crate) fn register_search_functions(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let text = context.get::<Option<String>>(0)?;
            Ok(text.map(|text| text.to_lowercase()))
        },
    )
}

/// Escape the SQL `LIKE` wildcards in `term` so it is matched literally.
///
/// Use with `ESCAPE '\'`.
fn escape_like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for character in term.chars() {
        if matches!(character, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(character);
    }

    escaped
}

/// Get a page of transactions, optionally only those matching `search`.
///
/// A transaction matches when `search` occurs in its title, description or the
/// text form of its price, ignoring case (including non-ASCII letters). An
/// empty search term matches every transaction.
///
/// The text form of a price is SQLite's, so whole numbers keep a trailing
/// ".0": a price of 1000 matches both "1000" and "1000.0".
///
/// Transactions are returned in ID order, and a page past the last match is
/// empty.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub(crate) fn search_transactions(
    search: Option<&str>,
    page: Page,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut query = format!("SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"");
    let mut params = Vec::new();

    if let Some(term) = search.filter(|term| !term.is_empty()) {
        query.push_str(&format!(
            " WHERE {UNICODE_LOWER}(title) LIKE ?1 ESCAPE '\\' \
            OR {UNICODE_LOWER}(description) LIKE ?1 ESCAPE '\\' \
            OR CAST(price AS TEXT) LIKE ?1 ESCAPE '\\'"
        ));
        params.push(Value::Text(format!(
            "%{}%",
            escape_like_pattern(&term.to_lowercase())
        )));
    }

    query.push_str(&format!(
        " ORDER BY id ASC LIMIT ?{} OFFSET ?{}",
        params.len() + 1,
        params.len() + 2
    ));
    params.push(Value::Integer(to_sql_integer(page.limit())));
    params.push(Value::Integer(to_sql_integer(page.offset())));

    tracing::debug!("listing transactions with query: {query}");

    connection
        .prepare(&query)?
        .query_map(params_from_iter(params), map_transaction_row)?
        .map(|transaction_result| transaction_result.map_err(Error::from))
        .collect()
}

/// SQLite integers are signed, so saturate anything larger.
fn to_sql_integer(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        db::initialize,
        pagination::{Page, PaginationConfig},
        transaction::{Transaction, insert_transaction},
    };

    use super::{escape_like_pattern, search_transactions};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn create_transaction(id: i64, title: &str, description: &str, price: f64, conn: &Connection) {
        let transaction = Transaction {
            id,
            title: title.to_owned(),
            price,
            description: description.to_owned(),
            category: "electronics".to_owned(),
            image: String::new(),
            sold: false,
            date_of_sale: datetime!(2023-03-01 12:00 UTC),
        };

        insert_transaction(&transaction, conn).expect("Could not insert transaction");
    }

    fn page(number: u64, size: u64) -> Page {
        Page::new(Some(number), Some(size), &PaginationConfig::default()).unwrap()
    }

    fn ids(transactions: &[Transaction]) -> Vec<i64> {
        transactions.iter().map(|transaction| transaction.id).collect()
    }

    #[test]
    fn pages_through_all_transactions() {
        let conn = get_test_connection();
        for id in 1..=25 {
            create_transaction(id, &format!("item #{id}"), "", id as f64, &conn);
        }

        let first = search_transactions(None, page(1, 10), &conn).unwrap();
        let third = search_transactions(None, page(3, 10), &conn).unwrap();
        let fourth = search_transactions(None, page(4, 10), &conn).unwrap();

        assert_eq!(ids(&first), (1..=10).collect::<Vec<_>>());
        assert_eq!(ids(&third), (21..=25).collect::<Vec<_>>());
        assert!(fourth.is_empty(), "want empty page, got {fourth:?}");
    }

    #[test]
    fn search_ignores_case() {
        let conn = get_test_connection();
        create_transaction(1, "Gaming Laptop", "", 999.0, &conn);
        create_transaction(2, "Desk Lamp", "", 20.0, &conn);

        let got = search_transactions(Some("LAPTOP"), page(1, 10), &conn).unwrap();

        assert_eq!(ids(&got), vec![1]);
    }

    #[test]
    fn search_ignores_case_of_non_ascii_letters() {
        let conn = get_test_connection();
        create_transaction(1, "Écran Téléviseur", "", 499.0, &conn);
        create_transaction(2, "Clavier", "", 25.0, &conn);
        create_transaction(3, "Lamp", "Straße edition", 30.0, &conn);

        let by_title = search_transactions(Some("écran"), page(1, 10), &conn).unwrap();
        let upper = search_transactions(Some("TÉLÉVISEUR"), page(1, 10), &conn).unwrap();
        let by_description = search_transactions(Some("STRASSE"), page(1, 10), &conn).unwrap();

        assert_eq!(ids(&by_title), vec![1]);
        assert_eq!(ids(&upper), vec![1]);
        // Lowercasing is not full case folding: "ß" does not become "ss".
        assert!(by_description.is_empty());
    }

    #[test]
    fn search_matches_description() {
        let conn = get_test_connection();
        create_transaction(1, "Backpack", "Fits 15 inch laptops", 109.95, &conn);
        create_transaction(2, "Ring", "Sterling silver", 10.99, &conn);

        let got = search_transactions(Some("laptop"), page(1, 10), &conn).unwrap();

        assert_eq!(ids(&got), vec![1]);
    }

    #[test]
    fn search_matches_price_text() {
        let conn = get_test_connection();
        create_transaction(1, "Backpack", "", 109.95, &conn);
        create_transaction(2, "Ring", "", 10.99, &conn);

        let got = search_transactions(Some("109.9"), page(1, 10), &conn).unwrap();

        assert_eq!(ids(&got), vec![1]);
    }

    #[test]
    fn whole_number_prices_match_with_and_without_decimal() {
        let conn = get_test_connection();
        create_transaction(1, "Television", "", 1000.0, &conn);
        create_transaction(2, "Radio", "", 100.5, &conn);

        let plain = search_transactions(Some("1000"), page(1, 10), &conn).unwrap();
        let decimal = search_transactions(Some("1000.0"), page(1, 10), &conn).unwrap();

        assert_eq!(ids(&plain), vec![1]);
        assert_eq!(ids(&decimal), vec![1]);
    }

    #[test]
    fn empty_search_matches_everything() {
        let conn = get_test_connection();
        create_transaction(1, "Backpack", "", 109.95, &conn);
        create_transaction(2, "Ring", "", 10.99, &conn);

        let got = search_transactions(Some(""), page(1, 10), &conn).unwrap();

        assert_eq!(ids(&got), vec![1, 2]);
    }

    #[test]
    fn search_treats_wildcards_literally() {
        let conn = get_test_connection();
        create_transaction(1, "100% cotton shirt", "", 25.0, &conn);
        create_transaction(2, "Cotton socks", "", 5.0, &conn);

        let got = search_transactions(Some("0%"), page(1, 10), &conn).unwrap();

        assert_eq!(ids(&got), vec![1]);
    }

    #[test]
    fn search_results_are_paged() {
        let conn = get_test_connection();
        for id in 1..=5 {
            create_transaction(id, "phone case", "", 9.0, &conn);
        }
        create_transaction(6, "monitor", "", 150.0, &conn);

        let got = search_transactions(Some("phone"), page(2, 3), &conn).unwrap();

        assert_eq!(ids(&got), vec![4, 5]);
    }

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like_pattern("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }
}
