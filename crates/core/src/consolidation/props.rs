//! Property-based tests for consolidation weighting invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use vantra_shared::types::{AccountId, CurrencyCode, EntityId};

use crate::accounts::{AccountClassification, AccountRecord};
use crate::entity::{CompanyEntity, EntityClassification};

use super::aggregator::{SisterChart, consolidate};

/// Strategy for balances (-1,000,000.00 to 1,000,000.00).
fn balance() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for ownership percentages (0.01 to 100.00).
fn ownership_pct() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000i64).prop_map(|v| Decimal::new(v, 2))
}

fn entity(name: &str, pct: Decimal) -> CompanyEntity {
    CompanyEntity {
        id: EntityId::new(),
        name: name.to_string(),
        country: "US".to_string(),
        base_currency: CurrencyCode::new("USD").unwrap(),
        classification: EntityClassification::Standard,
        parent_id: None,
        ownership_pct: pct,
        active: true,
    }
}

fn account(entity_id: EntityId, code: &str, bal: Decimal) -> AccountRecord {
    AccountRecord {
        id: AccountId::new(),
        entity_id,
        code: code.to_string(),
        name: code.to_string(),
        classification: AccountClassification::Asset,
        category: "current_asset".to_string(),
        opening_balance: Decimal::ZERO,
        current_balance: bal,
        active: true,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Line total equals parent balance plus the weighted sum of matching
    /// sister balances.
    #[test]
    fn prop_total_is_weighted_sum(
        parent_balance in balance(),
        sister_balances in prop::collection::vec((balance(), ownership_pct()), 0..8),
    ) {
        let parent = entity("P", Decimal::ONE_HUNDRED);
        let accounts = vec![account(parent.id, "1000", parent_balance)];
        let charts: Vec<SisterChart> = sister_balances
            .iter()
            .enumerate()
            .map(|(i, (bal, pct))| {
                let sister = entity(&format!("S{i}"), *pct);
                SisterChart {
                    accounts: vec![account(sister.id, "1000", *bal)],
                    entity: sister,
                }
            })
            .collect();

        let expected = parent_balance
            + sister_balances
                .iter()
                .map(|(bal, pct)| *bal * *pct / Decimal::ONE_HUNDRED)
                .sum::<Decimal>();

        let lines = consolidate(&parent, &accounts, &charts);
        prop_assert_eq!(lines.len(), 1);
        prop_assert_eq!(lines[0].total, expected);
        // One breakdown entry per contributing entity, parent included
        prop_assert_eq!(lines[0].breakdown.len(), sister_balances.len() + 1);
    }

    /// Breakdown entries always carry unweighted balances.
    #[test]
    fn prop_breakdown_is_unweighted(
        parent_balance in balance(),
        sister_balance in balance(),
        pct in ownership_pct(),
    ) {
        let parent = entity("P", Decimal::ONE_HUNDRED);
        let sister = entity("S", pct);
        let accounts = vec![account(parent.id, "1000", parent_balance)];
        let charts = vec![SisterChart {
            accounts: vec![account(sister.id, "1000", sister_balance)],
            entity: sister,
        }];

        let lines = consolidate(&parent, &accounts, &charts);
        prop_assert_eq!(lines[0].breakdown[0].balance, parent_balance);
        prop_assert_eq!(lines[0].breakdown[1].balance, sister_balance);
        prop_assert_eq!(lines[0].breakdown[1].ownership_pct, pct);
    }
}
