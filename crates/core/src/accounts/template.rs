//! Reference data provider: chart-of-accounts seed templates.
//!
//! Treated as a static lookup table. Entity creation bulk-copies the seed
//! rows for the entity's country template into that entity's own chart.

use super::types::AccountClassification;

/// One seed row from a chart-of-accounts template.
#[derive(Debug, Clone, Copy)]
pub struct SeedAccount {
    /// Account code.
    pub code: &'static str,
    /// Account name.
    pub name: &'static str,
    /// Classification.
    pub classification: AccountClassification,
    /// Reporting category.
    pub category: &'static str,
}

/// Static reference-data lookup: country -> template -> seed rows.
pub trait ReferenceDataProvider: Send + Sync {
    /// Returns the accounting-template identifier for a country code.
    fn template_for_country(&self, country: &str) -> &'static str;

    /// Returns the seed account rows for a template identifier.
    fn seed_accounts(&self, template_id: &str) -> Vec<SeedAccount>;
}

/// Built-in templates covering the standard classification layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticTemplates;

const STANDARD_TEMPLATE: &str = "standard";

const STANDARD_SEED: &[SeedAccount] = &[
    SeedAccount { code: "1000", name: "Cash and Bank", classification: AccountClassification::Asset, category: "current_asset" },
    SeedAccount { code: "1100", name: "Accounts Receivable", classification: AccountClassification::Asset, category: "current_asset" },
    SeedAccount { code: "1200", name: "Inventory", classification: AccountClassification::Asset, category: "current_asset" },
    SeedAccount { code: "1500", name: "Fixed Assets", classification: AccountClassification::Asset, category: "non_current_asset" },
    SeedAccount { code: "2000", name: "Accounts Payable", classification: AccountClassification::Liability, category: "current_liability" },
    SeedAccount { code: "2500", name: "Long-Term Debt", classification: AccountClassification::Liability, category: "non_current_liability" },
    SeedAccount { code: "3000", name: "Share Capital", classification: AccountClassification::Equity, category: "equity" },
    SeedAccount { code: "3100", name: "Retained Earnings", classification: AccountClassification::Equity, category: "equity" },
    SeedAccount { code: "4000", name: "Sales Revenue", classification: AccountClassification::Revenue, category: "operating_revenue" },
    SeedAccount { code: "5000", name: "Cost of Goods Sold", classification: AccountClassification::Expense, category: "cost_of_sales" },
    SeedAccount { code: "6000", name: "Operating Expenses", classification: AccountClassification::Expense, category: "operating_expense" },
];

impl ReferenceDataProvider for StaticTemplates {
    fn template_for_country(&self, _country: &str) -> &'static str {
        // All supported countries currently share the standard layout.
        STANDARD_TEMPLATE
    }

    fn seed_accounts(&self, template_id: &str) -> Vec<SeedAccount> {
        if template_id == STANDARD_TEMPLATE {
            STANDARD_SEED.to_vec()
        } else {
            Vec::new()
        }
    }
}
