//! Transaction domain model.

use serde::{Deserialize, Serialize};

use exchange_rates::Money;

use crate::error::DomainError;

/// The kind of document a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// An amount the customer owes
    Invoice,
    /// A credit note reducing what the customer owes
    Credit,
    /// A debit note increasing what the customer owes
    Debit,
}

impl TransactionType {
    /// Credits are subtracted when netting; invoices and debits are added.
    pub fn reduces_balance(&self) -> bool {
        matches!(self, TransactionType::Credit)
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Invoice => write!(f, "INVOICE"),
            TransactionType::Credit => write!(f, "CREDIT"),
            TransactionType::Debit => write!(f, "DEBIT"),
        }
    }
}

/// An invoice, credit note or debit note issued to a customer.
///
/// Transactions are immutable once imported - they represent
/// a historical record of what was billed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Customer name, the grouping key for aggregation
    pub customer: String,
    /// Customer tax (VAT) identifier
    pub tax_id: String,
    /// Document number
    pub document_id: String,
    pub transaction_type: TransactionType,
    /// Originating invoice of a credit or debit note; informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_document_id: Option<String>,
    /// Document total in its own currency
    pub total: Money,
}

impl Transaction {
    /// Creates a new invoice.
    pub fn invoice(
        customer: impl Into<String>,
        tax_id: impl Into<String>,
        document_id: impl Into<String>,
        total: Money,
    ) -> Self {
        Self {
            customer: customer.into(),
            tax_id: tax_id.into(),
            document_id: document_id.into(),
            transaction_type: TransactionType::Invoice,
            parent_document_id: None,
            total,
        }
    }

    /// Creates a credit note against `parent_document_id`.
    pub fn credit(
        customer: impl Into<String>,
        tax_id: impl Into<String>,
        document_id: impl Into<String>,
        parent_document_id: impl Into<String>,
        total: Money,
    ) -> Self {
        Self {
            transaction_type: TransactionType::Credit,
            parent_document_id: Some(parent_document_id.into()),
            ..Self::invoice(customer, tax_id, document_id, total)
        }
    }

    /// Creates a debit note against `parent_document_id`.
    pub fn debit(
        customer: impl Into<String>,
        tax_id: impl Into<String>,
        document_id: impl Into<String>,
        parent_document_id: impl Into<String>,
        total: Money,
    ) -> Self {
        Self {
            transaction_type: TransactionType::Debit,
            parent_document_id: Some(parent_document_id.into()),
            ..Self::invoice(customer, tax_id, document_id, total)
        }
    }

    /// Checks the field rules every imported record must satisfy.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.customer.trim().is_empty() {
            return Err(self.invalid("customer cannot be empty"));
        }
        // Some VAT numbers (e.g. Romanian) are only two characters long.
        if self.tax_id.trim().chars().count() < 2 {
            return Err(self.invalid("tax id must have at least 2 characters"));
        }
        if self.document_id.trim().is_empty() {
            return Err(self.invalid("document id cannot be empty"));
        }
        if self
            .parent_document_id
            .as_deref()
            .is_some_and(|parent| parent.trim().is_empty())
        {
            return Err(self.invalid("parent document id cannot be blank"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> DomainError {
        DomainError::ValidationError(format!(
            "transaction '{}': {}",
            self.document_id, reason
        ))
    }
}
