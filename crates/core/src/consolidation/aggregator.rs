//! Consolidation aggregation over loaded charts of accounts.
//!
//! The parent's chart defines the canonical rows, in load order. Each active
//! sister contributes its matching account's balance weighted by ownership
//! percentage; a sister without a matching code contributes nothing to that
//! line and adds no breakdown entry (sister charts are not required to be
//! identical).

use rust_decimal::Decimal;

use crate::accounts::AccountRecord;
use crate::entity::CompanyEntity;

use super::types::{BreakdownEntry, ConsolidatedLine};

/// A sister entity together with its loaded chart of accounts.
#[derive(Debug, Clone)]
pub struct SisterChart {
    /// The sister entity (carries ownership percentage).
    pub entity: CompanyEntity,
    /// The sister's active accounts.
    pub accounts: Vec<AccountRecord>,
}

/// Aggregates a parent's chart with its sisters' matching accounts.
///
/// Returns one line per parent account, in the order the parent accounts
/// were given. A parent with no accounts yields an empty list; a parent with
/// no sisters yields lines whose total equals the parent balance unweighted.
#[must_use]
pub fn consolidate(
    parent: &CompanyEntity,
    parent_accounts: &[AccountRecord],
    sisters: &[SisterChart],
) -> Vec<ConsolidatedLine> {
    parent_accounts
        .iter()
        .map(|account| consolidate_line(parent, account, sisters))
        .collect()
}

fn consolidate_line(
    parent: &CompanyEntity,
    account: &AccountRecord,
    sisters: &[SisterChart],
) -> ConsolidatedLine {
    let mut total = account.current_balance;
    let mut breakdown = vec![BreakdownEntry {
        entity_id: parent.id,
        entity_name: parent.name.clone(),
        balance: account.current_balance,
        ownership_pct: Decimal::ONE_HUNDRED,
    }];

    for sister in sisters {
        let Some(matching) = sister.accounts.iter().find(|a| a.code == account.code) else {
            continue;
        };

        let weighted =
            matching.current_balance * sister.entity.ownership_pct / Decimal::ONE_HUNDRED;
        total += weighted;
        breakdown.push(BreakdownEntry {
            entity_id: sister.entity.id,
            entity_name: sister.entity.name.clone(),
            balance: matching.current_balance,
            ownership_pct: sister.entity.ownership_pct,
        });
    }

    ConsolidatedLine {
        code: account.code.clone(),
        name: account.name.clone(),
        classification: account.classification,
        total,
        breakdown,
    }
}
