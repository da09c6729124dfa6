//! Non-negative numeric quantities recorded in the ledger.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors for ledger quantities.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum QuantityError {
    /// The value was NaN or infinite.
    #[error("value must be a finite number")]
    NotFinite,
    /// The value was below zero.
    #[error("value must not be negative, got {value}")]
    Negative {
        /// The rejected input.
        value: f64,
    },
}

fn validate(value: f64) -> Result<f64, QuantityError> {
    if !value.is_finite() {
        return Err(QuantityError::NotFinite);
    }
    if value < 0.0 {
        return Err(QuantityError::Negative { value });
    }
    // Normalise negative zero so equality and formatting stay predictable.
    Ok(value + 0.0)
}

/// A monetary amount in the household currency.
///
/// # Examples
/// ```
/// use messbook::domain::Amount;
///
/// let cost = Amount::new(12.5).expect("valid amount");
/// assert_eq!(cost.value(), 12.5);
/// assert!(Amount::new(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    /// The zero amount.
    pub const ZERO: Self = Self(0.0);

    /// Validate and construct an amount.
    pub fn new(value: f64) -> Result<Self, QuantityError> {
        validate(value).map(Self)
    }

    /// Construct an amount from whole cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(f64::from(cents) / 100.0)
    }

    /// The raw value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Amount {
    type Error = QuantityError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(value: Amount) -> Self {
        value.0
    }
}

/// Number of meals a member ate on one day.
///
/// Fractional counts are allowed (half portions).
///
/// # Examples
/// ```
/// use messbook::domain::MealCount;
///
/// assert_eq!(MealCount::new(1.5).expect("valid").value(), 1.5);
/// assert!(MealCount::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MealCount(f64);

impl MealCount {
    /// Validate and construct a meal count.
    pub fn new(value: f64) -> Result<Self, QuantityError> {
        validate(value).map(Self)
    }

    /// The raw value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for MealCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for MealCount {
    type Error = QuantityError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MealCount> for f64 {
    fn from(value: MealCount) -> Self {
        value.0
    }
}
