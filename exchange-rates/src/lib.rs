//! Exchange Rate Registry and Currency Conversion
//!
//! This library holds the fixed-precision core of invoice aggregation:
//! ISO 4217 currency codes, decimal money truncated to six fractional digits
//! after every operation, a validated snapshot of exchange rates with an
//! inferred base currency, and a convertor that pivots through that base.
//!
//! Rates are all expressed against one implicit base currency. The base is
//! the single currency in a batch whose rate equals 1.
//!
//! # Example
//! ```
//! use exchange_rates::{Currency, CurrencyConvertor, ExchangeRate, Money, RateSnapshot};
//! use rust_decimal::Decimal;
//!
//! let rates = RateSnapshot::import(vec![
//!     "USD:1".parse::<ExchangeRate>().unwrap(),
//!     "EUR:2".parse::<ExchangeRate>().unwrap(),
//! ])
//! .unwrap();
//! assert_eq!(rates.base_rate().currency.code(), "USD");
//!
//! let eur = Money::new(Decimal::from(1600), "EUR".parse::<Currency>().unwrap());
//! let usd = CurrencyConvertor::new(&rates)
//!     .convert_to(&eur, &"USD".parse().unwrap())
//!     .unwrap();
//! assert_eq!(usd.to_string(), "800.000000 USD");
//! ```

mod convertor;
mod currency;
mod error;
mod money;
mod registry;

pub use convertor::CurrencyConvertor;
pub use currency::Currency;
pub use error::ExchangeError;
pub use money::{Money, SCALE, truncate_to_scale};
pub use registry::{ExchangeRate, RateSnapshot};
