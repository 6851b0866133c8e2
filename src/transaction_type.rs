//! The expense/income marker shared by categories and transactions.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Whether a transaction, or the category it belongs to, records money spent
/// or money earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money spent.
    Expense,
    /// Money earned.
    Income,
}

impl TransactionType {
    /// The lowercase string form stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            _ => Err(Error::InvalidTransactionType(text.to_string())),
        }
    }
}

#[cfg(test)]
mod transaction_type_tests {
    use crate::{Error, transaction_type::TransactionType};

    #[test]
    fn parses_lowercase_words() {
        assert_eq!("expense".parse(), Ok(TransactionType::Expense));
        assert_eq!("income".parse(), Ok(TransactionType::Income));
    }

    #[test]
    fn rejects_unknown_text() {
        let result: Result<TransactionType, Error> = "transfer".parse();

        assert_eq!(
            result,
            Err(Error::InvalidTransactionType("transfer".to_string()))
        );
    }

    #[test]
    fn rejects_wrong_case() {
        let result: Result<TransactionType, Error> = "Expense".parse();

        assert_eq!(
            result,
            Err(Error::InvalidTransactionType("Expense".to_string()))
        );
    }

    #[test]
    fn round_trips_through_string_form() {
        for transaction_type in [TransactionType::Expense, TransactionType::Income] {
            assert_eq!(transaction_type.as_str().parse(), Ok(transaction_type));
        }
    }
}
