//! Company entities: group parents and their sister companies.

pub mod types;

pub use types::{CompanyEntity, EntityClassification, validate_ownership_pct};
