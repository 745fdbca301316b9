//! Chart-of-accounts domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vantra_shared::types::{AccountId, EntityId};

/// Account classification in the chart of accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountClassification {
    /// Asset account.
    Asset,
    /// Liability account.
    Liability,
    /// Equity account.
    Equity,
    /// Revenue account.
    Revenue,
    /// Expense account.
    Expense,
}

/// One chart-of-accounts line.
///
/// The account code is unique among active accounts of one entity, but the
/// same code legitimately recurs across every entity of a group: each entity
/// gets its own copy of the template. Consolidation matches on this code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Record identifier.
    pub id: AccountId,
    /// Owning entity.
    pub entity_id: EntityId,
    /// Account code, unique per entity among active accounts.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Classification.
    pub classification: AccountClassification,
    /// Reporting category within the classification.
    pub category: String,
    /// Balance at account creation.
    pub opening_balance: Decimal,
    /// Current running balance.
    pub current_balance: Decimal,
    /// Soft-delete flag.
    pub active: bool,
}
