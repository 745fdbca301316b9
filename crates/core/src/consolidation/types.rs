//! Consolidation output types.

use rust_decimal::Decimal;
use serde::Serialize;

use vantra_shared::types::EntityId;

use crate::accounts::AccountClassification;

/// Per-entity contribution to a consolidated line.
///
/// The balance here is the entity's own, unweighted figure; weighting by
/// ownership only affects the line total. Both are kept for transparency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownEntry {
    /// Contributing entity.
    pub entity_id: EntityId,
    /// Contributing entity's display name.
    pub entity_name: String,
    /// The entity's own account balance (unweighted).
    pub balance: Decimal,
    /// Ownership percentage applied to the line total; 100 for the parent.
    pub ownership_pct: Decimal,
}

/// One consolidated row, keyed by the parent's account code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolidatedLine {
    /// Parent account code.
    pub code: String,
    /// Parent account name.
    pub name: String,
    /// Parent account classification.
    pub classification: AccountClassification,
    /// Parent balance plus ownership-weighted sister balances.
    pub total: Decimal,
    /// Per-entity contributions, parent first.
    pub breakdown: Vec<BreakdownEntry>,
}
