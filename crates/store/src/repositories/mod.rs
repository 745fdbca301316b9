//! Typed repositories over the record store.
//!
//! Repositories hide document shapes and keys from the rest of the
//! application. Each one is bound to a single partition handle, so a
//! repository can never read or write across tenants.

pub mod account;
pub mod consolidation;
pub mod entity;
pub mod exchange_rate;

pub use account::{AccountError, AccountRepository, CreateAccountInput};
pub use consolidation::{ConsolidationError, ConsolidationService};
pub use entity::{EntityError, EntityRepository, NewParentInput, NewSisterInput};
pub use exchange_rate::{RateError, RateRepository, RefreshOutcome};
