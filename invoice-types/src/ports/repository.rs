//! Repository port traits.
//!
//! These are the primary ports in our hexagonal architecture.
//! Adapters (in-memory, database-backed, test doubles) implement them.

use std::sync::Arc;

use exchange_rates::RateSnapshot;

use crate::domain::Transaction;
use crate::error::RepoError;

/// Storage for the single active exchange-rate snapshot.
///
/// Replacement MUST be atomic: a reader sees either the previous snapshot
/// or the new one, never a mix.
#[async_trait::async_trait]
pub trait RateRepository: Send + Sync + 'static {
    /// Installs `snapshot`, discarding the previous one.
    async fn replace_rates(&self, snapshot: RateSnapshot) -> Result<(), RepoError>;

    /// Returns the active snapshot, or `None` before the first import.
    async fn current_rates(&self) -> Result<Option<Arc<RateSnapshot>>, RepoError>;
}

/// Append-only storage for imported transactions.
#[async_trait::async_trait]
pub trait TransactionRepository: Send + Sync + 'static {
    /// Appends a batch of transactions, returning how many were stored.
    async fn append_transactions(&self, transactions: Vec<Transaction>)
    -> Result<usize, RepoError>;

    /// Lists every stored transaction in import order.
    async fn list_transactions(&self) -> Result<Vec<Transaction>, RepoError>;

    /// Lists the transactions whose tax id equals `tax_id`, in import order.
    async fn list_transactions_by_tax_id(
        &self,
        tax_id: &str,
    ) -> Result<Vec<Transaction>, RepoError>;

    /// Removes every stored transaction.
    async fn clear_transactions(&self) -> Result<(), RepoError>;
}

/// Everything the invoice service needs from storage.
pub trait InvoiceRepository: RateRepository + TransactionRepository {}

impl<T: RateRepository + TransactionRepository> InvoiceRepository for T {}
