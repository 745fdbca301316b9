//! Cross-entity consolidation: one weighted line per parent account code.

pub mod aggregator;
pub mod types;

#[cfg(test)]
mod props;

pub use aggregator::{SisterChart, consolidate};
pub use types::{BreakdownEntry, ConsolidatedLine};
