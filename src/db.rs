//! Database initialisation for the application.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, category::create_category_table, transaction::create_transaction_table,
};

/// Create the application tables in the database.
///
/// The tables are created in a single exclusive transaction. Tables that
/// already exist are left untouched, so this function can be called on every
/// start-up.
///
/// # Errors
/// This function will return a:
/// - [Error::SqlError] if there was an unexpected SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use crate::db::initialize;

    fn table_names(connection: &Connection) -> Vec<String> {
        connection
            .prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' \
                 ORDER BY name",
            )
            .expect("Could not prepare statement")
            .query_map((), |row| row.get(0))
            .expect("Could not query table names")
            .map(|row| row.expect("Could not read table name"))
            .collect()
    }

    #[test]
    fn initialize_creates_both_tables() {
        let connection =
            Connection::open_in_memory().expect("Could not open database in memory.");

        initialize(&connection).expect("Could not initialize database.");

        assert_eq!(table_names(&connection), vec!["categories", "transactions"]);
    }

    #[test]
    fn initialize_twice_succeeds() {
        let connection =
            Connection::open_in_memory().expect("Could not open database in memory.");

        initialize(&connection).expect("Could not initialize database.");
        initialize(&connection).expect("Could not initialize database a second time.");

        assert_eq!(table_names(&connection), vec!["categories", "transactions"]);
    }
}
