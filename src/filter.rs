//! Query filters for the transaction table.
//!
//! A filter narrows the table by transaction type, by a calendar period, or
//! both, and can optionally sort by date. Month and year periods resolve to
//! half-open windows relative to "today"; custom ranges are closed on both
//! ends. The asymmetry is deliberate and matches the boundary behaviour the
//! rest of the application is built around.

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{Error, transaction_type::TransactionType};

/// Defines which transactions should be fetched from
/// [query_transactions](crate::transaction::query_transactions).
///
/// The default filter selects everything in storage order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Include only transactions of this type. `None` includes both types.
    pub transaction_type: Option<TransactionType>,
    /// The calendar period to restrict dates to.
    pub period: PeriodFilter,
    /// The first day of a custom period. Ignored unless `period` is
    /// [PeriodFilter::Custom].
    pub start_date: Option<Date>,
    /// The last day of a custom period. Ignored unless `period` is
    /// [PeriodFilter::Custom].
    pub end_date: Option<Date>,
    /// Orders transactions by date in the order `sort_date`. `None` returns
    /// transactions in the order they are stored.
    pub sort_date: Option<SortOrder>,
}

/// The calendar period restricting a [TransactionFilter].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodFilter {
    /// No date restriction.
    #[default]
    All,
    /// The calendar month containing "today".
    Month,
    /// The calendar year containing "today".
    Year,
    /// A caller-supplied date range, inclusive on both ends.
    Custom,
}

/// The order to sort transactions by date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

/// A resolved date window and the comparison to apply at its upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateBounds {
    /// `start <= date < end`. Month and year windows.
    HalfOpen { start: Date, end: Date },
    /// `start <= date <= end`. Custom windows.
    Closed { start: Date, end: Date },
}

impl TransactionFilter {
    /// Resolve the filter's period into concrete date bounds relative to
    /// `today`.
    ///
    /// # Errors
    /// This function will return an [Error::MissingDateRange] if the period
    /// is [PeriodFilter::Custom] and either range date is `None`.
    pub(crate) fn date_bounds(&self, today: Date) -> Result<Option<DateBounds>, Error> {
        match self.period {
            PeriodFilter::All => Ok(None),
            PeriodFilter::Month => {
                let start = Date::from_calendar_date(today.year(), today.month(), 1)
                    .expect("invalid month start date");
                let end = match today.month() {
                    Month::December => {
                        Date::from_calendar_date(today.year() + 1, Month::January, 1)
                    }
                    month => Date::from_calendar_date(today.year(), month.next(), 1),
                }
                .expect("invalid month end date");

                Ok(Some(DateBounds::HalfOpen { start, end }))
            }
            PeriodFilter::Year => {
                let start = Date::from_calendar_date(today.year(), Month::January, 1)
                    .expect("invalid year start date");
                let end = Date::from_calendar_date(today.year() + 1, Month::January, 1)
                    .expect("invalid year end date");

                Ok(Some(DateBounds::HalfOpen { start, end }))
            }
            PeriodFilter::Custom => match (self.start_date, self.end_date) {
                (Some(start), Some(end)) => Ok(Some(DateBounds::Closed { start, end })),
                _ => Err(Error::MissingDateRange),
            },
        }
    }
}
