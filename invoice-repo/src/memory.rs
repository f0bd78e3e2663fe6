//! In-memory repository.
//!
//! Holds the active rate snapshot and the transaction log behind
//! `tokio::sync::RwLock`s, so concurrent readers and writers are serialized
//! without blocking the runtime.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use invoice_types::{RateRepository, RateSnapshot, RepoError, Transaction, TransactionRepository};

#[derive(Debug, Default)]
pub struct InMemoryRepo {
    rates: RwLock<Option<Arc<RateSnapshot>>>,
    transactions: RwLock<Vec<Transaction>>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RateRepository for InMemoryRepo {
    async fn replace_rates(&self, snapshot: RateSnapshot) -> Result<(), RepoError> {
        let snapshot = Arc::new(snapshot);
        let mut rates = self.rates.write().await;
        tracing::debug!(
            base = %snapshot.base_currency(),
            count = snapshot.len(),
            "replacing rate snapshot"
        );
        *rates = Some(snapshot);
        Ok(())
    }

    async fn current_rates(&self) -> Result<Option<Arc<RateSnapshot>>, RepoError> {
        Ok(self.rates.read().await.clone())
    }
}

#[async_trait]
impl TransactionRepository for InMemoryRepo {
    async fn append_transactions(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<usize, RepoError> {
        let count = transactions.len();
        let mut stored = self.transactions.write().await;
        stored.extend(transactions);
        tracing::debug!(appended = count, total = stored.len(), "appended transactions");
        Ok(count)
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>, RepoError> {
        Ok(self.transactions.read().await.clone())
    }

    async fn list_transactions_by_tax_id(
        &self,
        tax_id: &str,
    ) -> Result<Vec<Transaction>, RepoError> {
        Ok(self
            .transactions
            .read()
            .await
            .iter()
            .filter(|t| t.tax_id == tax_id)
            .cloned()
            .collect())
    }

    async fn clear_transactions(&self) -> Result<(), RepoError> {
        let mut stored = self.transactions.write().await;
        tracing::debug!(removed = stored.len(), "clearing transactions");
        stored.clear();
        Ok(())
    }
}
