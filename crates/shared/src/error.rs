//! The application-wide error taxonomy.
//!
//! Module-level errors (rate, entity, account, consolidation, store) each
//! define a conversion into `AppError` next to their own definition; the
//! request-handling layer only ever sees these variants and the stable
//! `error_code()` strings.

use thiserror::Error;

use crate::types::currency::InvalidCurrencyCode;

/// Convenience alias for fallible operations surfaced to the request layer.
pub type AppResult<T> = Result<T, AppError>;

/// The uniform error surface of the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// A requested record does not exist (or is soft-deleted).
    #[error("not found: {0}")]
    NotFound(String),

    /// Input failed validation before any state change.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation is well-formed but forbidden by a business rule.
    #[error("business rule violation: {0}")]
    BusinessRule(String),

    /// The operation conflicts with existing state, e.g. a duplicate.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The record store failed.
    #[error("store failure: {0}")]
    Store(String),

    /// An external collaborator (e.g. the rate provider) failed.
    #[error("external service failure: {0}")]
    ExternalService(String),

    /// Anything that should never happen in correct operation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// The stable machine-readable code surfaced to clients.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Store(_) => "STORE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for errors caused by the caller rather than the system.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::Validation(_) | Self::BusinessRule(_) | Self::Conflict(_)
        )
    }
}

impl From<InvalidCurrencyCode> for AppError {
    fn from(err: InvalidCurrencyCode) -> Self {
        Self::Validation(err.to_string())
    }
}
