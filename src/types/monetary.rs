use crate::types::errors::MonetaryError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const DECIMAL_PLACES: u32 = 2;

/// A currency amount held at exactly two fractional digits.
///
/// Every constructor and every arithmetic operation quantizes its result with
/// round-half-up (midpoint away from zero), so no value ever carries more
/// precision than what gets persisted.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Monetary(Decimal);

impl Monetary {
    pub fn zero() -> Self {
        Monetary::from_decimal(Decimal::ZERO)
    }

    /// Quantizes an arbitrary decimal to two places.
    pub fn from_decimal(value: Decimal) -> Self {
        let mut rounded = value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(DECIMAL_PLACES);
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
        }
        Monetary(rounded)
    }

    pub fn from_cents(cents: i64) -> Self {
        Monetary::from_decimal(Decimal::new(cents, DECIMAL_PLACES))
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn abs(self) -> Monetary {
        Monetary(self.0.abs())
    }

    pub fn checked_add(self, rhs: Monetary) -> Result<Monetary, MonetaryError> {
        self.0.checked_add(rhs.0).map(Monetary::from_decimal).ok_or(MonetaryError::Overflow)
    }

    pub fn checked_sub(self, rhs: Monetary) -> Result<Monetary, MonetaryError> {
        self.0.checked_sub(rhs.0).map(Monetary::from_decimal).ok_or(MonetaryError::Overflow)
    }

    /// Multiplies a unit price by a quantity.
    pub fn checked_times(self, quantity: u32) -> Result<Monetary, MonetaryError> {
        self.0.checked_mul(Decimal::from(quantity)).map(Monetary::from_decimal).ok_or(MonetaryError::Overflow)
    }
}

impl Display for Monetary {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:.width$}", self.0, width = DECIMAL_PLACES as usize)
    }
}

impl FromStr for Monetary {
    type Err = MonetaryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(MonetaryError::Empty);
        }

        let parsed = Decimal::from_str(value)
            .map_err(|source| MonetaryError::NotDecimal { value: value.to_string(), source })?;

        Ok(Monetary::from_decimal(parsed))
    }
}
