//! Company entity domain types.
//!
//! Ownership is a one-level, acyclic tree: a sister entity references
//! exactly one parent, and only `Group`-classified entities may own sisters.
//! Sisters are soft-deleted to preserve historical ledger references.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use vantra_shared::types::{CurrencyCode, EntityId};

/// Business classification of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityClassification {
    /// A holding/group company; may own sister entities and be consolidated.
    Group,
    /// A standalone company.
    Standard,
}

/// A legal/accounting unit: a group parent or one of its sisters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyEntity {
    /// Entity identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// ISO country code used to pick the chart-of-accounts template.
    pub country: String,
    /// The entity's functional currency.
    pub base_currency: CurrencyCode,
    /// Business classification.
    pub classification: EntityClassification,
    /// Parent entity for sisters; `None` for parents.
    pub parent_id: Option<EntityId>,
    /// Ownership percentage held by the parent; 100 for parents themselves.
    pub ownership_pct: Decimal,
    /// Soft-delete flag.
    pub active: bool,
}

impl CompanyEntity {
    /// Returns true if this entity may own sisters and be consolidated.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.classification == EntityClassification::Group
    }

    /// Returns true for sister entities.
    #[must_use]
    pub fn is_sister(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Validates an ownership percentage: strictly positive, at most 100.
#[must_use]
pub fn validate_ownership_pct(pct: Decimal) -> bool {
    pct > Decimal::ZERO && pct <= Decimal::ONE_HUNDRED
}
