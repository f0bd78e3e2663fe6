//! Exchange rate snapshot with base-currency inference.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;
use crate::error::ExchangeError;
use crate::money::truncate_to_scale;

/// Rate of one currency against the batch's base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeRate {
    pub currency: Currency,
    pub rate: Decimal,
}

impl ExchangeRate {
    pub fn new(currency: Currency, rate: Decimal) -> Self {
        Self { currency, rate }
    }

    /// True when the rate equals 1 at scale 6.
    pub fn is_base(&self) -> bool {
        truncate_to_scale(self.rate) == Decimal::ONE
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.currency, self.rate)
    }
}

/// Parses the `CODE:RATE` form, e.g. `EUR:0.878`.
impl FromStr for ExchangeRate {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ExchangeError::InvalidRateFormat(s.to_string());

        let (code, rate) = s.trim().split_once(':').ok_or_else(malformed)?;
        if rate.is_empty() || !rate.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
            return Err(malformed());
        }

        let currency = Currency::new(code).map_err(|_| malformed())?;
        let rate = Decimal::from_str(rate).map_err(|_| malformed())?;
        Ok(Self::new(currency, rate))
    }
}

/// A validated, immutable set of exchange rates.
///
/// Exactly one rate equals 1; that entry is the base currency every other
/// rate is quoted against. A new import produces a new snapshot rather than
/// mutating this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateSnapshot {
    rates: HashMap<Currency, ExchangeRate>,
    base: ExchangeRate,
}

impl RateSnapshot {
    /// Validates a batch of rates and infers its base currency.
    ///
    /// Every entry of the batch counts towards the base check, so a base
    /// currency listed twice is two defaults. Otherwise a code repeated within
    /// the batch keeps its last rate.
    pub fn import<I>(rates: I) -> Result<Self, ExchangeError>
    where
        I: IntoIterator<Item = ExchangeRate>,
    {
        let mut by_currency = HashMap::new();
        let mut base: Option<ExchangeRate> = None;
        for rate in rates {
            if rate.rate <= Decimal::ZERO {
                return Err(ExchangeError::InvalidRate {
                    currency: rate.currency,
                    rate: rate.rate,
                });
            }
            if rate.is_base() {
                if base.is_some() {
                    return Err(ExchangeError::MultipleDefaultCurrencies);
                }
                base = Some(rate.clone());
            }
            by_currency.insert(rate.currency.clone(), rate);
        }

        // A later entry may have overwritten the base with a non-base rate.
        let base = base
            .filter(|base| by_currency.get(&base.currency).is_some_and(ExchangeRate::is_base))
            .ok_or(ExchangeError::NoDefaultCurrency)?;

        Ok(Self {
            rates: by_currency,
            base,
        })
    }

    pub fn get_rate(&self, currency: &Currency) -> Option<&ExchangeRate> {
        self.rates.get(currency)
    }

    /// Like [`get_rate`](Self::get_rate), but a missing rate is an error.
    pub fn rate_for(&self, currency: &Currency) -> Result<&ExchangeRate, ExchangeError> {
        self.get_rate(currency)
            .ok_or_else(|| ExchangeError::NoExchangeRateForCurrency(currency.clone()))
    }

    pub fn base_rate(&self) -> &ExchangeRate {
        &self.base
    }

    pub fn base_currency(&self) -> &Currency {
        &self.base.currency
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// All rates, ordered by currency code.
    pub fn rates(&self) -> Vec<&ExchangeRate> {
        let mut rates: Vec<_> = self.rates.values().collect();
        rates.sort_by(|a, b| a.currency.cmp(&b.currency));
        rates
    }
}
