//! Chart of accounts records and seed templates.

pub mod template;
pub mod types;

pub use template::{ReferenceDataProvider, SeedAccount, StaticTemplates};
pub use types::{AccountClassification, AccountRecord};
