//! Per-customer aggregation result.

use serde::{Deserialize, Serialize};

use exchange_rates::Money;

/// Net balance of one customer, denominated in the requested output currency.
///
/// Computed fresh on every aggregation call and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInvoiceSummary {
    pub customer: String,
    pub total: Money,
}

impl CustomerInvoiceSummary {
    pub fn new(customer: impl Into<String>, total: Money) -> Self {
        Self {
            customer: customer.into(),
            total,
        }
    }
}
