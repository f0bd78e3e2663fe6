//! Pivot conversion through the base currency.

use crate::currency::Currency;
use crate::error::ExchangeError;
use crate::money::{Money, scaled_div, scaled_mul};
use crate::registry::RateSnapshot;

/// Converts money between any two currencies of one [`RateSnapshot`].
///
/// The amount is first divided by the source rate (giving base-currency
/// units) and then multiplied by the target rate. Each of the two steps is
/// truncated to scale 6 on its own.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyConvertor<'a> {
    rates: &'a RateSnapshot,
}

impl<'a> CurrencyConvertor<'a> {
    pub fn new(rates: &'a RateSnapshot) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &'a RateSnapshot {
        self.rates
    }

    pub fn convert_to(&self, money: &Money, target: &Currency) -> Result<Money, ExchangeError> {
        let source_rate = self.rates.rate_for(money.currency())?;
        let target_rate = self.rates.rate_for(target)?;

        let pivoted = scaled_div(money.amount(), source_rate.rate)?;
        let converted = scaled_mul(pivoted, target_rate.rate)?;

        Ok(Money::new(converted, target.clone()))
    }
}
