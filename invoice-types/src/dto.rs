//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use exchange_rates::{Currency, ExchangeRate};

use crate::domain::{CustomerInvoiceSummary, Transaction};

// ─────────────────────────────────────────────────────────────────────────────
// Calculate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to import a batch and compute customer balances in one go.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// Currency every balance is reported in
    pub output_currency: Currency,
    /// Rates for this request; replaces the active snapshot
    pub exchange_rates: Vec<ExchangeRate>,
    /// Transactions appended to storage before aggregating
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Restrict the result to the customer with this tax id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_vat: Option<String>,
}

/// Net balance of a single customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerBalance {
    pub name: String,
    pub balance: Decimal,
}

/// Balances of all requested customers in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub currency: Currency,
    pub customers: Vec<CustomerBalance>,
}

impl CalculateResponse {
    pub fn from_summaries(currency: Currency, summaries: Vec<CustomerInvoiceSummary>) -> Self {
        let customers = summaries
            .into_iter()
            .map(|summary| CustomerBalance {
                name: summary.customer,
                balance: summary.total.amount(),
            })
            .collect();

        Self {
            currency,
            customers,
        }
    }
}
