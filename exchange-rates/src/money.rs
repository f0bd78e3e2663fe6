//! Scale-6 decimal money.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};

use crate::currency::Currency;
use crate::error::ExchangeError;

/// Number of fractional digits kept after every arithmetic step.
pub const SCALE: u32 = 6;

/// Truncates toward zero at [`SCALE`] digits and pads the result to exactly
/// that scale, so `1050` becomes `1050.000000`.
pub fn truncate_to_scale(value: Decimal) -> Decimal {
    let mut truncated = value.round_dp_with_strategy(SCALE, RoundingStrategy::ToZero);
    truncated.rescale(SCALE);
    truncated
}

pub(crate) fn scaled_div(dividend: Decimal, divisor: Decimal) -> Result<Decimal, ExchangeError> {
    dividend
        .checked_div(divisor)
        .map(truncate_to_scale)
        .ok_or(ExchangeError::ArithmeticOverflow("division"))
}

pub(crate) fn scaled_mul(lhs: Decimal, rhs: Decimal) -> Result<Decimal, ExchangeError> {
    lhs.checked_mul(rhs)
        .map(truncate_to_scale)
        .ok_or(ExchangeError::ArithmeticOverflow("multiplication"))
}

/// An exact decimal amount in one currency.
///
/// Amounts may be negative: a customer whose credits exceed their invoices
/// nets out below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    #[serde(deserialize_with = "deserialize_amount")]
    amount: Decimal,
    currency: Currency,
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    <Decimal as Deserialize>::deserialize(deserializer).map(truncate_to_scale)
}

impl Money {
    /// Creates money truncated to scale 6, so every running total starts
    /// from amounts that need no further truncation.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: truncate_to_scale(amount),
            currency,
        }
    }

    /// Zero at scale 6, the starting point of every running total.
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: truncate_to_scale(Decimal::ZERO),
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Adds `other`, truncating the sum to scale 6.
    pub fn checked_add(&self, other: &Money) -> Result<Money, ExchangeError> {
        self.ensure_same_currency(other)?;
        let sum = self
            .amount
            .checked_add(other.amount)
            .ok_or(ExchangeError::ArithmeticOverflow("addition"))?;
        Ok(Money::new(truncate_to_scale(sum), self.currency.clone()))
    }

    /// Subtracts `other`, truncating the difference to scale 6.
    pub fn checked_sub(&self, other: &Money) -> Result<Money, ExchangeError> {
        self.ensure_same_currency(other)?;
        let difference = self
            .amount
            .checked_sub(other.amount)
            .ok_or(ExchangeError::ArithmeticOverflow("subtraction"))?;
        Ok(Money::new(truncate_to_scale(difference), self.currency.clone()))
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), ExchangeError> {
        if self.currency != other.currency {
            return Err(ExchangeError::CurrencyMismatch {
                expected: self.currency.clone(),
                got: other.currency.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
