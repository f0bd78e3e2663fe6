//! # Invoice Repository
//!
//! Concrete repository implementations (adapters) for the invoice service.
//! This crate provides the adapters that implement the `RateRepository`
//! and `TransactionRepository` ports.

pub mod memory;


pub use memory::InMemoryRepo;

/// Build an empty in-memory repository.
///
/// # Examples
///
/// ```
/// let repo = invoice_repo::build_repo();
/// # let _ = repo;
/// ```
pub fn build_repo() -> InMemoryRepo {
    InMemoryRepo::new()
}
