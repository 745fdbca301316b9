//! Logical collections and filter expressions.

use serde_json::Value;

/// Logical collection names the engine reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Company entities (parents and sisters).
    Entities,
    /// Chart-of-accounts records.
    Accounts,
    /// Exchange rate records.
    ExchangeRates,
    /// User identity -> partition assignments.
    PartitionAssignments,
}

impl Collection {
    /// Returns the collection's storage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entities => "entities",
            Self::Accounts => "accounts",
            Self::ExchangeRates => "exchange_rates",
            Self::PartitionAssignments => "partition_assignments",
        }
    }
}

/// A conjunction of field-equality conditions over document fields.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    conditions: Vec<(&'static str, Value)>,
}

impl Filter {
    /// Creates an empty filter matching every document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field-equality condition.
    #[must_use]
    pub fn eq(mut self, field: &'static str, value: Value) -> Self {
        self.conditions.push((field, value));
        self
    }

    /// Restricts the filter to active (not soft-deleted) documents.
    #[must_use]
    pub fn active_only(self) -> Self {
        self.eq("active", Value::Bool(true))
    }

    /// Returns true when `doc` satisfies every condition.
    #[must_use]
    pub fn matches(&self, doc: &Value) -> bool {
        self.conditions
            .iter()
            .all(|(field, value)| doc.get(field) == Some(value))
    }
}
