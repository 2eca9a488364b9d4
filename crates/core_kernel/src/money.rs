//! Monetary amounts with precise decimal arithmetic
//!
//! Every monetary value in the finance core is a `rust_decimal::Decimal`;
//! floating point would accumulate cent-level drift in balance comparisons.
//! The [`Amount`] newtype is the boundary type for money entering the core:
//! once constructed it is guaranteed positive and at currency precision, so
//! downstream code can work with the raw `Decimal` without re-validating.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of fractional digits carried by monetary amounts (cents).
pub const CURRENCY_SCALE: u32 = 2;

/// Errors that can occur when validating a monetary amount
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("amount must be positive, got {0}")]
    NotPositive(Decimal),

    #[error("amount {0} carries sub-cent precision")]
    TooPrecise(Decimal),
}

/// A validated, strictly positive monetary amount
///
/// Construction enforces the two invariants every debt and settlement amount
/// must satisfy: the value is greater than zero and has at most
/// [`CURRENCY_SCALE`] fractional digits.
///
/// # Example
///
/// ```
/// use core_kernel::Amount;
/// use rust_decimal_macros::dec;
///
/// let amount = Amount::new(dec!(120.50)).unwrap();
/// assert_eq!(amount.value(), dec!(120.50));
///
/// assert!(Amount::new(dec!(0)).is_err());
/// assert!(Amount::new(dec!(1.005)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Validates and wraps a decimal value
    ///
    /// # Errors
    ///
    /// - [`MoneyError::NotPositive`] if the value is zero or negative
    /// - [`MoneyError::TooPrecise`] if the value carries sub-cent digits
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value <= Decimal::ZERO {
            return Err(MoneyError::NotPositive(value));
        }
        // Decimal equality is numeric, so trailing zeros still pass.
        if value.round_dp(CURRENCY_SCALE) != value {
            return Err(MoneyError::TooPrecise(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying decimal value
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Decimal {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.dp$}", self.0, dp = CURRENCY_SCALE as usize)
    }
}
