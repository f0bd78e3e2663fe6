//! Error type for rate registry and conversion operations.

use rust_decimal::Decimal;

use crate::currency::Currency;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    #[error("No default currency provided while importing")]
    NoDefaultCurrency,

    #[error("Multiple currency rates equal to 1 provided")]
    MultipleDefaultCurrencies,

    #[error("No exchange rate for currency {0}")]
    NoExchangeRateForCurrency(Currency),

    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    #[error("Invalid exchange rate {rate} for {currency}: rates must be positive")]
    InvalidRate { currency: Currency, rate: Decimal },

    #[error("Invalid exchange rate '{0}', expected CODE:RATE")]
    InvalidRateFormat(String),

    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: Currency, got: Currency },

    #[error("Decimal overflow during {0}")]
    ArithmeticOverflow(&'static str),
}
