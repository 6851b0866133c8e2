//! The storage and validation core of a personal finance tracker.
//!
//! This library validates user-entered expense and income records, persists
//! them in a SQLite database, and answers filtered queries and summary totals
//! over them. The UI layer is expected to open a [rusqlite::Connection], run
//! [initialize_db] once on start-up, and then call into the [form],
//! [category] and [transaction] modules.

#![warn(missing_docs)]

pub mod category;
mod database_id;
mod db;
pub mod filter;
pub mod form;
pub mod transaction;
pub mod transaction_type;

pub use database_id::DatabaseID;
pub use db::initialize as initialize_db;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required form field was empty or missing.
    ///
    /// The field name is reported so the client can point at the offending
    /// input.
    #[error("{0} cannot be empty")]
    MissingField(&'static str),

    /// A date string could not be parsed as a calendar date.
    ///
    /// Dates must be in YYYY-MM-DD format and must exist on the calendar, so
    /// "2023-02-29" is rejected.
    #[error("\"{0}\" is not a valid date in YYYY-MM-DD format")]
    InvalidDateFormat(String),

    /// An amount string was not a number greater than zero.
    #[error("\"{0}\" is not a positive amount")]
    InvalidAmount(String),

    /// A transaction type string was neither "expense" nor "income".
    #[error("\"{0}\" is not a valid transaction type, expected \"expense\" or \"income\"")]
    InvalidTransactionType(String),

    /// A custom period filter was missing its start date, its end date, or
    /// both.
    #[error("a custom period requires both a start date and an end date")]
    MissingDateRange,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
