//! Common domain types shared across crates.

pub mod currency;
pub mod id;

pub use currency::CurrencyCode;
pub use id::{AccountId, EntityId, RateId};
