//! The transaction model and database functions for storing, querying, and
//! managing transactions.

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::{CategoryName, get_or_create_category},
    database_id::DatabaseID,
    filter::{DateBounds, SortOrder, TransactionFilter},
    transaction_type::TransactionType,
};

/// A record of an expense or income event.
///
/// Rows are joined against the category table, so a transaction carries both
/// its category ID and the category's display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseID,
    /// When the transaction happened.
    pub date: Date,
    /// The amount of money spent or earned. Always positive, the direction is
    /// given by `transaction_type`.
    pub amount: f64,
    /// The ID of the category the transaction belongs to.
    pub category_id: DatabaseID,
    /// The name of the category the transaction belongs to.
    pub category: CategoryName,
    /// Whether the transaction is an expense or income.
    pub transaction_type: TransactionType,
    /// A text description of what the transaction was for.
    pub description: String,
}

/// A validated transaction that has not been given an ID yet.
///
/// Create one with [TransactionForm::validate](crate::form::TransactionForm::validate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// When the transaction happened.
    pub date: Date,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// The name of the category the transaction belongs to.
    pub category: CategoryName,
    /// Whether the transaction is an expense or income.
    pub transaction_type: TransactionType,
    /// A text description of what the transaction was for.
    pub description: String,
}

/// The sums of all expense and income transactions in the database.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionSummary {
    /// The sum of all expense amounts.
    pub total_expenses: f64,
    /// The sum of all income amounts.
    pub total_income: f64,
}

impl TransactionSummary {
    /// The net balance, income minus expenses.
    pub fn balance(&self) -> f64 {
        self.total_income - self.total_expenses
    }
}

/// Create a transaction in the database, creating its category first if no
/// matching category exists.
///
/// Both writes happen in a single transaction, so a failed insert does not
/// leave a new category behind.
///
/// # Errors
/// This function will return a:
/// - [Error::SqlError] if there was an unexpected SQL error.
pub fn create_transaction(
    new_transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    let category = get_or_create_category(
        &new_transaction.category,
        new_transaction.transaction_type,
        &sql_transaction,
    )?;

    sql_transaction.execute(
        "INSERT INTO transactions (date, amount, category_id, type, description) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        (
            new_transaction.date,
            new_transaction.amount,
            category.id,
            new_transaction.transaction_type.as_str(),
            new_transaction.description.as_str(),
        ),
    )?;
    let id = sql_transaction.last_insert_rowid();

    sql_transaction.commit()?;

    Ok(Transaction {
        id,
        date: new_transaction.date,
        amount: new_transaction.amount,
        category_id: category.id,
        category: category.name,
        transaction_type: new_transaction.transaction_type,
        description: new_transaction.description,
    })
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction.
/// - [Error::SqlError] if there was an unexpected SQL error.
pub fn get_transaction(id: DatabaseID, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT t.id, t.date, t.amount, t.category_id, c.name, t.type, t.description \
             FROM transactions t \
             INNER JOIN categories c ON t.category_id = c.id \
             WHERE t.id = :id",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Overwrite every field of the transaction `id` with the values in
/// `new_transaction`, creating the new category first if needed.
///
/// Returns whether a transaction with `id` existed. Updating a missing ID is
/// not an error, the category write still commits.
///
/// # Errors
/// This function will return a:
/// - [Error::SqlError] if there was an unexpected SQL error.
pub fn update_transaction(
    id: DatabaseID,
    new_transaction: &NewTransaction,
    connection: &Connection,
) -> Result<bool, Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    let category = get_or_create_category(
        &new_transaction.category,
        new_transaction.transaction_type,
        &sql_transaction,
    )?;

    let rows_affected = sql_transaction.execute(
        "UPDATE transactions \
         SET date = ?1, amount = ?2, category_id = ?3, type = ?4, description = ?5 \
         WHERE id = ?6",
        (
            new_transaction.date,
            new_transaction.amount,
            category.id,
            new_transaction.transaction_type.as_str(),
            new_transaction.description.as_str(),
            id,
        ),
    )?;

    sql_transaction.commit()?;

    Ok(rows_affected > 0)
}

/// Delete the transaction `id` from the database.
///
/// Deleting an ID that does not exist is not an error. The transaction's
/// category is left in place even if no other transaction refers to it.
///
/// # Errors
/// This function will return a:
/// - [Error::SqlError] if there was an unexpected SQL error.
pub fn delete_transaction(id: DatabaseID, connection: &Connection) -> Result<(), Error> {
    connection.execute("DELETE FROM transactions WHERE id = ?1", (id,))?;

    Ok(())
}

/// Retrieve the transactions matching `filter` from the database.
///
/// Month and year periods are resolved against `today` and select dates in
/// the half-open window `start <= date < end`. Custom periods are inclusive
/// of both end dates.
///
/// # Errors
/// This function will return a:
/// - [Error::MissingDateRange] if `filter` uses a custom period without both
///   range dates.
/// - [Error::SqlError] if there was an unexpected SQL error.
pub fn query_transactions(
    filter: &TransactionFilter,
    today: Date,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut query_string_parts = vec![
        "SELECT t.id, t.date, t.amount, t.category_id, c.name, t.type, t.description \
         FROM transactions t \
         INNER JOIN categories c ON t.category_id = c.id"
            .to_string(),
    ];
    let mut where_clause_parts = vec![];
    let mut query_parameters: Vec<Value> = vec![];

    if let Some(transaction_type) = filter.transaction_type {
        where_clause_parts.push(format!("t.type = ?{}", query_parameters.len() + 1));
        query_parameters.push(Value::Text(transaction_type.as_str().to_string()));
    }

    match filter.date_bounds(today)? {
        Some(DateBounds::HalfOpen { start, end }) => {
            where_clause_parts.push(format!(
                "t.date >= ?{} AND t.date < ?{}",
                query_parameters.len() + 1,
                query_parameters.len() + 2
            ));
            query_parameters.push(Value::Text(start.to_string()));
            query_parameters.push(Value::Text(end.to_string()));
        }
        Some(DateBounds::Closed { start, end }) => {
            where_clause_parts.push(format!(
                "t.date >= ?{} AND t.date <= ?{}",
                query_parameters.len() + 1,
                query_parameters.len() + 2
            ));
            query_parameters.push(Value::Text(start.to_string()));
            query_parameters.push(Value::Text(end.to_string()));
        }
        None => {}
    }

    if !where_clause_parts.is_empty() {
        query_string_parts.push(format!("WHERE {}", where_clause_parts.join(" AND ")));
    }

    match filter.sort_date {
        Some(SortOrder::Ascending) => query_string_parts.push("ORDER BY t.date ASC".to_string()),
        Some(SortOrder::Descending) => query_string_parts.push("ORDER BY t.date DESC".to_string()),
        None => {}
    }

    let query_string = query_string_parts.join(" ");

    connection
        .prepare(&query_string)?
        .query_map(
            params_from_iter(query_parameters.iter()),
            map_transaction_row,
        )?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect()
}

/// Retrieve the sums of all expense and income amounts in the database.
///
/// An empty table sums to zero on both sides.
///
/// # Errors
/// This function will return a:
/// - [Error::SqlError] if there was an unexpected SQL error.
pub fn get_transaction_summary(connection: &Connection) -> Result<TransactionSummary, Error> {
    Ok(TransactionSummary {
        total_expenses: sum_amounts(TransactionType::Expense, connection)?,
        total_income: sum_amounts(TransactionType::Income, connection)?,
    })
}

fn sum_amounts(transaction_type: TransactionType, connection: &Connection) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT IFNULL(SUM(amount), 0) FROM transactions WHERE type = ?1",
            (transaction_type.as_str(),),
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Create the transactions table in the database.
///
/// # Errors
/// This function will return an error if there was an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (\
         id INTEGER PRIMARY KEY AUTOINCREMENT, \
         date TEXT NOT NULL, \
         amount REAL NOT NULL, \
         category_id INTEGER NOT NULL REFERENCES categories(id), \
         type TEXT NOT NULL CHECK (type IN ('expense', 'income')), \
         description TEXT\
         )",
        (),
    )?;

    Ok(())
}

fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let amount = row.get(2)?;
    let category_id = row.get(3)?;
    let raw_category: String = row.get(4)?;
    let raw_type: String = row.get(5)?;
    let description: Option<String> = row.get(6)?;

    // The CHECK constraint on the type column only admits these two values.
    let transaction_type = match raw_type.as_str() {
        "income" => TransactionType::Income,
        _ => TransactionType::Expense,
    };

    Ok(Transaction {
        id,
        date,
        amount,
        category_id,
        category: CategoryName::new_unchecked(&raw_category),
        transaction_type,
        description: description.unwrap_or_default(),
    })
}
