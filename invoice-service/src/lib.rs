//! # Invoice Service
//!
//! Invoice calculator and application service layer.
//!
//! ## Architecture
//!
//! - `calculator/` - Per-customer netting and conversion over one rate snapshot
//! - `service/` - Application service (orchestrates imports and aggregation)
//!
//! The service is generic over `R: InvoiceRepository`, allowing
//! different repository implementations to be injected.

pub mod calculator;
pub mod service;


pub use calculator::InvoiceCalculator;
pub use service::InvoiceService;
