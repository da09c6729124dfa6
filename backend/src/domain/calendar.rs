//! Calendar keys used by the ledger.
//!
//! Dates and months are stored as ISO strings so that lexical order equals
//! chronological order. Validation happens once, on construction, via
//! `chrono`; afterwards every comparison is a plain string comparison.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Validation errors for calendar keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// The value is not a `YYYY-MM-DD` calendar date.
    #[error("date must be a calendar date formatted YYYY-MM-DD, got '{value}'")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },
    /// The value is not a `YYYY-MM` month.
    #[error("month must be formatted YYYY-MM, got '{value}'")]
    InvalidMonth {
        /// The rejected input.
        value: String,
    },
}

/// A calendar day in `YYYY-MM-DD` form.
///
/// ## Invariants
/// - Always ten ASCII characters naming a real calendar date.
///
/// # Examples
/// ```
/// use messbook::domain::LedgerDate;
///
/// let date = LedgerDate::parse("2024-03-05").expect("valid date");
/// assert_eq!(date.as_str(), "2024-03-05");
/// assert!(LedgerDate::parse("2024-02-30").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LedgerDate {
    key: String,
    day: NaiveDate,
}

impl LedgerDate {
    /// Validate and construct a date key.
    pub fn parse(value: impl Into<String>) -> Result<Self, CalendarError> {
        let value = value.into();
        let canonical = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .ok()
            .map(Self::from_naive)
            .filter(|date| date.key == value);
        canonical.ok_or(CalendarError::InvalidDate { value })
    }

    /// Build a date key from a `chrono` date.
    #[must_use]
    pub fn from_naive(day: NaiveDate) -> Self {
        Self {
            key: day.format("%Y-%m-%d").to_string(),
            day,
        }
    }

    /// The `YYYY-MM-DD` representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.key.as_str()
    }

    /// The underlying `chrono` date.
    #[must_use]
    pub const fn to_naive(&self) -> NaiveDate {
        self.day
    }

    /// The month this date falls in.
    #[must_use]
    pub fn month(&self) -> BillingMonth {
        BillingMonth::from_naive(self.day)
    }
}

impl fmt::Display for LedgerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl TryFrom<String> for LedgerDate {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<LedgerDate> for String {
    fn from(value: LedgerDate) -> Self {
        value.key
    }
}

/// A billing month in `YYYY-MM` form.
///
/// Membership is the inclusive lexical range `[YYYY-MM-01, YYYY-MM-31]`,
/// which is exact for validated [`LedgerDate`] values.
///
/// # Examples
/// ```
/// use messbook::domain::{BillingMonth, LedgerDate};
///
/// let month = BillingMonth::parse("2024-03").expect("valid month");
/// assert_eq!(month.first_day_key(), "2024-03-01");
/// assert!(month.contains(&LedgerDate::parse("2024-03-31").expect("date")));
/// assert!(!month.contains(&LedgerDate::parse("2024-04-01").expect("date")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BillingMonth(String);

impl BillingMonth {
    /// Validate and construct a month key.
    pub fn parse(value: impl Into<String>) -> Result<Self, CalendarError> {
        let value = value.into();
        let valid = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
            .is_ok_and(|date| Self::from_naive(date).0 == value);
        if valid {
            Ok(Self(value))
        } else {
            Err(CalendarError::InvalidMonth { value })
        }
    }

    /// The month containing `date`.
    #[must_use]
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(format!("{:04}-{:02}", date.year(), date.month()))
    }

    /// The `YYYY-MM` representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Lower bound of the month range, also the key used for rent payments.
    #[must_use]
    pub fn first_day_key(&self) -> String {
        format!("{}-01", self.0)
    }

    /// Upper bound of the month range.
    #[must_use]
    pub fn last_day_key(&self) -> String {
        format!("{}-31", self.0)
    }

    /// Whether a date string falls inside the month range.
    #[must_use]
    pub fn contains_key(&self, date: &str) -> bool {
        date >= self.first_day_key().as_str() && date <= self.last_day_key().as_str()
    }

    /// Whether a ledger date falls inside the month.
    #[must_use]
    pub fn contains(&self, date: &LedgerDate) -> bool {
        self.contains_key(date.as_str())
    }

    /// Whether a stored rent label names this month (`YYYY-MM` or
    /// `YYYY-MM-01`).
    #[must_use]
    pub fn labels(&self, rent_month: &str) -> bool {
        rent_month.starts_with(self.0.as_str())
    }
}

impl fmt::Display for BillingMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BillingMonth {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<BillingMonth> for String {
    fn from(value: BillingMonth) -> Self {
        value.0
    }
}
