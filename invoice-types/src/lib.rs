//! # Invoice Types
//!
//! Domain types and port traits for the invoice aggregation service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Transaction, CustomerInvoiceSummary)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for the calculate boundary
//! - `error/` - Domain and application error types
//!
//! Currency, money and exchange rates come from the `exchange-rates` crate
//! and are re-exported here.

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{CustomerInvoiceSummary, Transaction, TransactionType};
pub use dto::*;
pub use error::{AppError, DomainError, ErrorClass, RepoError};
pub use exchange_rates::{
    Currency, CurrencyConvertor, ExchangeError, ExchangeRate, Money, RateSnapshot,
};
pub use ports::{InvoiceRepository, RateRepository, TransactionRepository};
