//! Store error types.

use thiserror::Error;

/// Errors from the record store.
///
/// Backend failures propagate unmodified to the caller as fatal for that
/// single operation; no retry loop exists at this layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record could not be serialized or deserialized.
    #[error("record serialization failed: {0}")]
    Serialization(String),

    /// The storage backend failed.
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<StoreError> for vantra_shared::AppError {
    fn from(err: StoreError) -> Self {
        Self::Store(err.to_string())
    }
}
