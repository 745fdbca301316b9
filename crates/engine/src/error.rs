//! Mappings from engine errors into the shared app-wide taxonomy.
//!
//! The request-handling layer (out of scope here) works in terms of
//! `AppError`; together with the conversions each crate defines for its own
//! errors, this gives that layer one uniform surface.

use vantra_shared::AppError;

use crate::EngineError;
use crate::onboarding::OnboardingError;

impl From<OnboardingError> for AppError {
    fn from(err: OnboardingError) -> Self {
        match err {
            OnboardingError::AlreadyCompleted(_) => Self::Conflict(err.to_string()),
            OnboardingError::Store(e) => e.into(),
        }
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        Self::Internal(err.to_string())
    }
}
