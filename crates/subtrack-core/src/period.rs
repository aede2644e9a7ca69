//! Month/year periods.
//!
//! A [`Period`] is the only calendar granularity the domain cares about. It is
//! written as `MM-YYYY` (zero-padded month, dash, four-digit year) both on the
//! wire and in filter parameters. Storage uses the first day of the month.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The textual layout accepted by [`Period::from_str`].
pub const PERIOD_FORMAT: &str = "MM-YYYY";

/// A supplied string is not a valid `MM-YYYY` period.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid period {value:?}: expected MM-YYYY")]
pub struct PeriodError {
    /// The rejected input.
    pub value: String,
}

impl PeriodError {
    fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

/// A calendar month and year.
///
/// Ordering is chronological (year first, then month).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period from a month (1-12) and a year (0-9999).
    ///
    /// Returns `None` when either component is out of range.
    #[must_use]
    pub fn new(month: u32, year: i32) -> Option<Self> {
        if (1..=12).contains(&month) && (0..=9999).contains(&year) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// Build a period from a calendar date, discarding the day of month.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month, 1-12.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// The four-digit year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The first day of the month, as persisted in the store.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        // month and year are range-checked on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != PERIOD_FORMAT.len()
            || bytes[2] != b'-'
            || !bytes[..2].iter().all(u8::is_ascii_digit)
            || !bytes[3..].iter().all(u8::is_ascii_digit)
        {
            return Err(PeriodError::new(s));
        }

        let month: u32 = s[..2].parse().map_err(|_| PeriodError::new(s))?;
        let year: i32 = s[3..].parse().map_err(|_| PeriodError::new(s))?;

        Self::new(month, year).ok_or_else(|| PeriodError::new(s))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

impl fmt::Debug for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Period({self})")
    }
}

impl TryFrom<String> for Period {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.to_string()
    }
}
