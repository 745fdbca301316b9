//! Cross-cutting types for the Vantra workspace: typed identifiers,
//! validated currency codes, the application error taxonomy, and layered
//! configuration loading. Everything here is storage- and transport-free.

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
