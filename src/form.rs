//! Validation of raw transaction form input.
//!
//! The UI collects every field as text. [TransactionForm::validate] checks
//! the lot and produces a [NewTransaction] ready for storage. Nothing here
//! touches the database, so validation can be re-run freely.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error, category::CategoryName, transaction::NewTransaction, transaction_type::TransactionType,
};

/// The stored date format. Fixed-width and zero-padded so that dates compare
/// lexicographically as text.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The raw field values collected by a transaction entry form.
///
/// # Examples
///
/// ```rust
/// use finance_tracker::form::TransactionForm;
///
/// let new_transaction = TransactionForm {
///     date: "2024-01-15",
///     amount: "42.50",
///     category: "Groceries",
///     transaction_type: "expense",
///     description: "Weekly shop",
/// }
/// .validate()
/// .unwrap();
///
/// assert_eq!(new_transaction.amount, 42.50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionForm<'a> {
    /// The transaction date as text, expected in `YYYY-MM-DD` form.
    pub date: &'a str,
    /// The amount as text, expected to parse to a number greater than zero.
    pub amount: &'a str,
    /// The category name.
    pub category: &'a str,
    /// The transaction type, `expense` or `income`.
    pub transaction_type: &'a str,
    /// Free-text description, may be empty.
    pub description: &'a str,
}

impl TransactionForm<'_> {
    /// Check every field and assemble the validated [NewTransaction].
    ///
    /// Surrounding whitespace is removed from all fields before checking.
    /// Required fields are checked for presence first, then each field is
    /// parsed in turn.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingField] if the date, amount, category, or type is blank,
    /// - [Error::InvalidDateFormat] if the date is not a real `YYYY-MM-DD` calendar date,
    /// - [Error::InvalidAmount] if the amount does not parse, or is not greater than zero,
    /// - or [Error::InvalidTransactionType] if the type is not `expense` or `income`.
    pub fn validate(&self) -> Result<NewTransaction, Error> {
        let date = self.date.trim();
        let amount = self.amount.trim();
        let transaction_type = self.transaction_type.trim();

        if date.is_empty() {
            return Err(Error::MissingField("date"));
        }

        if amount.is_empty() {
            return Err(Error::MissingField("amount"));
        }

        let category = CategoryName::new(self.category)?;

        if transaction_type.is_empty() {
            return Err(Error::MissingField("type"));
        }

        Ok(NewTransaction {
            date: parse_date(date)?,
            amount: parse_amount(amount)?,
            category,
            transaction_type: transaction_type.parse::<TransactionType>()?,
            description: self.description.trim().to_string(),
        })
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// The month must be 01-12 and the day must exist in that month and year, so
/// a 13th month or February 29 outside a leap year is rejected.
///
/// # Errors
/// This function will return an [Error::InvalidDateFormat] if `text` does not
/// parse.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, DATE_FORMAT).map_err(|_| Error::InvalidDateFormat(text.to_string()))
}

fn parse_amount(text: &str) -> Result<f64, Error> {
    let amount: f64 = text
        .parse()
        .map_err(|_| Error::InvalidAmount(text.to_string()))?;

    if amount > 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount(text.to_string()))
    }
}


#[cfg(test)]
mod parse_date_tests {
    use time::macros::date;

    use crate::{Error, form::parse_date};

    #[test]
    fn parses_zero_padded_dates() {
        assert_eq!(parse_date("2024-01-05"), Ok(date!(2024 - 01 - 05)));
    }

    #[test]
    fn rejects_trailing_characters() {
        assert_eq!(
            parse_date("2024-01-05x"),
            Err(Error::InvalidDateFormat("2024-01-05x".to_string()))
        );
    }

    #[test]
    fn rejects_leap_day_outside_leap_years() {
        assert_eq!(
            parse_date("1900-02-29"),
            Err(Error::InvalidDateFormat("1900-02-29".to_string()))
        );
        assert_eq!(parse_date("2000-02-29"), Ok(date!(2000 - 02 - 29)));
    }
}
