//! Error types for the invoice service.

use exchange_rates::ExchangeError;

/// Domain-level errors (business rule violations).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error("No transactions found for tax id {0}")]
    NoTransactionsFoundForTaxId(String),

    #[error("No exchange rates have been imported")]
    RatesNotImported,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Application-level errors returned by the service.
///
/// The domain kind is kept intact so callers can branch on it;
/// [`AppError::class`] gives the coarse response class.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// How a caller-facing layer should report an [`AppError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    BadRequest,
    NotFound,
    Internal,
}

impl ErrorClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorClass::BadRequest => "bad_request",
            ErrorClass::NotFound => "not_found",
            ErrorClass::Internal => "internal",
        }
    }
}

impl AppError {
    pub fn class(&self) -> ErrorClass {
        match self {
            AppError::Domain(DomainError::NoTransactionsFoundForTaxId(_)) => ErrorClass::NotFound,
            AppError::Domain(_) => ErrorClass::BadRequest,
            AppError::Internal(_) => ErrorClass::Internal,
        }
    }

    /// The domain error behind this failure, if any.
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            AppError::Domain(e) => Some(e),
            AppError::Internal(_) => None,
        }
    }
}

impl From<ExchangeError> for AppError {
    fn from(err: ExchangeError) -> Self {
        AppError::Domain(err.into())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => AppError::Domain(e),
            RepoError::Storage(e) => AppError::Internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use exchange_rates::Currency;

    use super::*;

    #[test]
    fn test_missing_client_maps_to_not_found() {
        let err = AppError::from(DomainError::NoTransactionsFoundForTaxId("RO1".into()));
        assert_eq!(err.class(), ErrorClass::NotFound);
    }

    #[test]
    fn test_exchange_errors_map_to_bad_request() {
        let err = AppError::from(ExchangeError::NoExchangeRateForCurrency(
            Currency::new("JPY").unwrap(),
        ));
        assert_eq!(err.class(), ErrorClass::BadRequest);
        assert_eq!(err.to_string(), "No exchange rate for currency JPY");
        assert!(matches!(
            err.domain(),
            Some(DomainError::Exchange(ExchangeError::NoExchangeRateForCurrency(_)))
        ));
    }

    #[test]
    fn test_storage_error_maps_to_internal() {
        let err = AppError::from(RepoError::Storage("lock poisoned".into()));
        assert_eq!(err.class(), ErrorClass::Internal);
        assert!(err.domain().is_none());
    }

    #[test]
    fn test_repo_domain_error_passes_through() {
        let err = AppError::from(RepoError::Domain(DomainError::RatesNotImported));
        assert!(matches!(err, AppError::Domain(DomainError::RatesNotImported)));
    }
}
