//! Category management for the finance tracker.
//!
//! A category is a named, typed (expense or income) grouping for
//! transactions. Categories are created lazily the first time a transaction
//! references a (name, type) pair that is not in the database yet, and are
//! never deleted.

use std::fmt::Display;

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseID, transaction_type::TransactionType};

/// The name of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// Leading and trailing whitespace is removed.
    ///
    /// # Errors
    ///
    /// This function will return an error if `name` is empty or blank.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::MissingField("category"))
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty or blank.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty
    /// invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for expenses and income, e.g., 'Groceries', 'Eating Out', 'Wages'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    /// The id of the category.
    pub id: DatabaseID,

    /// The name of the category.
    pub name: CategoryName,

    /// Whether this category groups expenses or income.
    pub transaction_type: TransactionType,
}

/// Look up the category matching `name` and `transaction_type`, inserting it
/// first if it does not exist yet.
///
/// The (name, type) pair is the dedup key: the same name may exist once as an
/// expense category and once as an income category, but not twice with the
/// same type.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_or_create_category(
    name: &CategoryName,
    transaction_type: TransactionType,
    connection: &Connection,
) -> Result<Category, Error> {
    let existing_id = connection
        .prepare("SELECT id FROM categories WHERE name = ?1 AND type = ?2")?
        .query_row((name.as_ref(), transaction_type.as_str()), |row| {
            row.get::<_, DatabaseID>(0)
        });

    match existing_id {
        Ok(id) => Ok(Category {
            id,
            name: name.clone(),
            transaction_type,
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            connection.execute(
                "INSERT INTO categories (name, type) VALUES (?1, ?2)",
                (name.as_ref(), transaction_type.as_str()),
            )?;
            let id = connection.last_insert_rowid();

            tracing::debug!("created category \"{name}\" ({transaction_type})");

            Ok(Category {
                id,
                name: name.clone(),
                transaction_type,
            })
        }
        Err(error) => Err(error.into()),
    }
}

/// Retrieve all distinct category names, in first-insertion order.
///
/// A name used by both an expense and an income category appears once. Used
/// to populate the category picker in the UI.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_category_names(connection: &Connection) -> Result<Vec<CategoryName>, Error> {
    connection
        .prepare("SELECT name FROM categories GROUP BY name ORDER BY MIN(id)")?
        .query_map([], |row| {
            let raw_name: String = row.get(0)?;

            Ok(CategoryName::new_unchecked(&raw_name))
        })?
        .map(|maybe_name| maybe_name.map_err(|error| error.into()))
        .collect()
}

/// Create the categories table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('expense', 'income'))
                )",
        (),
    )?;

    Ok(())
}

#[cfg(test)]
mod category_name_tests {
    use crate::{Error, category::CategoryName};

    #[test]
    fn new_fails_on_empty_string() {
        let category_name = CategoryName::new("");

        assert_eq!(category_name, Err(Error::MissingField("category")));
    }

    #[test]
    fn new_fails_on_blank_string() {
        let category_name = CategoryName::new("   ");

        assert_eq!(category_name, Err(Error::MissingField("category")));
    }

    #[test]
    fn new_trims_surrounding_whitespace() {
        let category_name =
            CategoryName::new("  Groceries ").expect("Could not create category name");

        assert_eq!(category_name.as_ref(), "Groceries");
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let category_name = CategoryName::new("🔥");

        assert!(category_name.is_ok())
    }
}

#[cfg(test)]
mod category_query_tests {
    use rusqlite::Connection;

    use crate::{
        category::{CategoryName, get_category_names, get_or_create_category},
        transaction_type::TransactionType,
    };

    use super::create_category_table;

    fn get_test_db_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        create_category_table(&connection).expect("Could not create categories table");
        connection
    }

    fn count_categories(connection: &Connection) -> i64 {
        connection
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
            .expect("Could not count categories")
    }

    #[test]
    fn get_or_create_inserts_new_category() {
        let connection = get_test_db_connection();
        let name = CategoryName::new("Food").unwrap();

        let category = get_or_create_category(&name, TransactionType::Expense, &connection)
            .expect("Could not create category");

        assert!(category.id > 0);
        assert_eq!(category.name, name);
        assert_eq!(category.transaction_type, TransactionType::Expense);
    }

    #[test]
    fn get_or_create_returns_same_id_for_same_name_and_type() {
        let connection = get_test_db_connection();
        let name = CategoryName::new("Food").unwrap();

        let first = get_or_create_category(&name, TransactionType::Expense, &connection)
            .expect("Could not create category");
        let second = get_or_create_category(&name, TransactionType::Expense, &connection)
            .expect("Could not look up category");

        assert_eq!(first.id, second.id);
        assert_eq!(
            count_categories(&connection),
            1,
            "want 1 category row after repeated get_or_create, got {}",
            count_categories(&connection)
        );
    }

    #[test]
    fn get_or_create_separates_types_with_same_name() {
        let connection = get_test_db_connection();
        let name = CategoryName::new("Food").unwrap();

        let expense = get_or_create_category(&name, TransactionType::Expense, &connection)
            .expect("Could not create expense category");
        let income = get_or_create_category(&name, TransactionType::Income, &connection)
            .expect("Could not create income category");

        assert_ne!(expense.id, income.id);
        assert_eq!(count_categories(&connection), 2);
    }

    #[test]
    fn get_category_names_preserves_insertion_order() {
        let connection = get_test_db_connection();
        for name in ["Rent", "Salary", "Groceries"] {
            get_or_create_category(
                &CategoryName::new_unchecked(name),
                TransactionType::Expense,
                &connection,
            )
            .expect("Could not create category");
        }

        let names = get_category_names(&connection).expect("Could not get category names");

        let got: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
        assert_eq!(got, vec!["Rent", "Salary", "Groceries"]);
    }

    #[test]
    fn get_category_names_deduplicates_across_types() {
        let connection = get_test_db_connection();
        let name = CategoryName::new_unchecked("Food");
        get_or_create_category(&name, TransactionType::Expense, &connection)
            .expect("Could not create expense category");
        get_or_create_category(&name, TransactionType::Income, &connection)
            .expect("Could not create income category");

        let names = get_category_names(&connection).expect("Could not get category names");

        assert_eq!(names, vec![name]);
    }
}
