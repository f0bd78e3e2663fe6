//! Domain models for the invoice service.

pub mod summary;
pub mod transaction;

pub use summary::CustomerInvoiceSummary;
pub use transaction::{Transaction, TransactionType};
