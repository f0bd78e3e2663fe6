//! Invoice Application Service
//!
//! Orchestrates rate imports, transaction imports and aggregation through
//! the repository ports. Contains NO infrastructure logic - pure business
//! orchestration.

use std::sync::Arc;

use invoice_types::{
    AppError, CalculateRequest, CalculateResponse, Currency, CurrencyConvertor,
    CustomerInvoiceSummary, DomainError, ExchangeRate, InvoiceRepository, Money, RateSnapshot,
    Transaction,
};

use crate::calculator::InvoiceCalculator;

/// Application service for invoice aggregation.
///
/// Generic over `R: InvoiceRepository` - the adapter is injected at compile time.
/// Every aggregation reads the rate snapshot once and computes against that
/// snapshot only, so a concurrent rate import never changes rates halfway
/// through a calculation.
pub struct InvoiceService<R: InvoiceRepository> {
    repo: R,
}

impl<R: InvoiceRepository> InvoiceService<R> {
    /// Creates a new invoice service with the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Exchange Rates
    // ─────────────────────────────────────────────────────────────────────────────

    /// Validates a batch of rates and replaces the active snapshot with it.
    ///
    /// Returns the inferred base rate. A rejected batch leaves the previous
    /// snapshot in place.
    #[tracing::instrument(skip(self, rates), fields(count = rates.len()))]
    pub async fn import_rates(&self, rates: Vec<ExchangeRate>) -> Result<ExchangeRate, AppError> {
        let snapshot = RateSnapshot::import(rates)?;
        let base = snapshot.base_rate().clone();

        self.repo.replace_rates(snapshot).await?;
        tracing::info!(base = %base.currency, "imported exchange rates");
        Ok(base)
    }

    /// Gets the rate of `currency` in the active snapshot.
    pub async fn get_rate(&self, currency: &Currency) -> Result<Option<ExchangeRate>, AppError> {
        let rates = self.rates().await?;
        Ok(rates.get_rate(currency).cloned())
    }

    /// Gets the base rate (the one equal to 1) of the active snapshot.
    pub async fn base_rate(&self) -> Result<ExchangeRate, AppError> {
        let rates = self.rates().await?;
        Ok(rates.base_rate().clone())
    }

    /// Converts `money` into `target` using the active snapshot.
    #[tracing::instrument(skip(self), fields(from = %money.currency()))]
    pub async fn convert_to(&self, money: &Money, target: &Currency) -> Result<Money, AppError> {
        let rates = self.rates().await?;
        let converted = CurrencyConvertor::new(&rates).convert_to(money, target)?;
        Ok(converted)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Transactions
    // ─────────────────────────────────────────────────────────────────────────────

    /// Validates and appends a batch of transactions.
    ///
    /// The whole batch is checked before anything is stored.
    #[tracing::instrument(skip(self, transactions), fields(count = transactions.len()))]
    pub async fn import_transactions(
        &self,
        transactions: Vec<Transaction>,
    ) -> Result<usize, AppError> {
        for transaction in &transactions {
            transaction.validate()?;
        }

        let stored = self.repo.append_transactions(transactions).await?;
        tracing::debug!(stored, "imported transactions");
        Ok(stored)
    }

    /// Removes every stored transaction.
    pub async fn clear_transactions(&self) -> Result<(), AppError> {
        self.repo.clear_transactions().await.map_err(Into::into)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Aggregation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Net balance of every customer in storage, in `output_currency`.
    #[tracing::instrument(skip(self))]
    pub async fn sum_all_invoices(
        &self,
        output_currency: &Currency,
    ) -> Result<Vec<CustomerInvoiceSummary>, AppError> {
        let rates = self.rates().await?;
        let transactions = self.repo.list_transactions().await?;

        let summaries =
            InvoiceCalculator::new(&rates).sum_all_invoices(&transactions, output_currency)?;
        tracing::debug!(
            transactions = transactions.len(),
            customers = summaries.len(),
            "summed all invoices"
        );
        Ok(summaries)
    }

    /// Net balance of the customer identified by `tax_id`, in `output_currency`.
    #[tracing::instrument(skip(self))]
    pub async fn sum_invoices_for_client(
        &self,
        tax_id: &str,
        output_currency: &Currency,
    ) -> Result<CustomerInvoiceSummary, AppError> {
        let transactions = self.repo.list_transactions_by_tax_id(tax_id).await?;
        if transactions.is_empty() {
            return Err(DomainError::NoTransactionsFoundForTaxId(tax_id.to_string()).into());
        }

        let rates = self.rates().await?;
        let summary = InvoiceCalculator::new(&rates).sum_invoices_for_client(
            tax_id,
            &transactions,
            output_currency,
        )?;
        Ok(summary)
    }

    /// Imports the request's rates and transactions, then aggregates either
    /// every customer or only the one named by `customer_vat`.
    #[tracing::instrument(skip(self, req), fields(output = %req.output_currency))]
    pub async fn calculate(&self, req: CalculateRequest) -> Result<CalculateResponse, AppError> {
        if req
            .customer_vat
            .as_deref()
            .is_some_and(|vat| vat.trim().is_empty())
        {
            let err = DomainError::ValidationError("customer VAT cannot be blank".into());
            return Err(err.into());
        }

        // Both batches are validated before either reaches the store.
        let snapshot = RateSnapshot::import(req.exchange_rates)?;
        for transaction in &req.transactions {
            transaction.validate()?;
        }

        let base = snapshot.base_currency().clone();
        self.repo.replace_rates(snapshot).await?;
        let stored = self.repo.append_transactions(req.transactions).await?;
        tracing::info!(base = %base, stored, "imported calculate request");

        let summaries = match &req.customer_vat {
            Some(vat) => vec![self.sum_invoices_for_client(vat, &req.output_currency).await?],
            None => self.sum_all_invoices(&req.output_currency).await?,
        };

        Ok(CalculateResponse::from_summaries(req.output_currency, summaries))
    }

    async fn rates(&self) -> Result<Arc<RateSnapshot>, AppError> {
        self.repo
            .current_rates()
            .await?
            .ok_or_else(|| DomainError::RatesNotImported.into())
    }
}
