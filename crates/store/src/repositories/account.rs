//! Chart-of-accounts repository.

use rust_decimal::Decimal;
use serde_json::json;

use vantra_core::accounts::{AccountClassification, AccountRecord, SeedAccount};
use vantra_shared::types::{AccountId, EntityId};

use crate::document::{Collection, Filter};
use crate::error::StoreError;
use crate::partition::PartitionHandle;

/// Errors from account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// An active account with this code already exists under the entity.
    /// The existing record is left untouched.
    #[error("account code '{code}' already exists for this entity")]
    DuplicateCode {
        /// The conflicting code.
        code: String,
    },

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AccountError> for vantra_shared::AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::DuplicateCode { .. } => Self::Conflict(err.to_string()),
            AccountError::Store(e) => e.into(),
        }
    }
}

/// Input for creating one account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account code, unique per entity among active accounts.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Classification.
    pub classification: AccountClassification,
    /// Reporting category.
    pub category: String,
    /// Opening balance; the current balance starts here.
    pub opening_balance: Decimal,
}

/// Account repository, bound to one partition.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    handle: PartitionHandle,
}

impl AccountRepository {
    /// Creates a repository over a partition handle.
    #[must_use]
    pub fn new(handle: PartitionHandle) -> Self {
        Self { handle }
    }

    /// Creates an account under an entity.
    ///
    /// # Errors
    ///
    /// `AccountError::DuplicateCode` when an active account with the same
    /// code already exists under this entity.
    pub async fn create(
        &self,
        entity_id: EntityId,
        input: CreateAccountInput,
    ) -> Result<AccountRecord, AccountError> {
        if self.find_by_code(entity_id, &input.code).await?.is_some() {
            return Err(AccountError::DuplicateCode { code: input.code });
        }

        let record = AccountRecord {
            id: AccountId::new(),
            entity_id,
            code: input.code,
            name: input.name,
            classification: input.classification,
            category: input.category,
            opening_balance: input.opening_balance,
            current_balance: input.opening_balance,
            active: true,
        };
        self.upsert(&record).await?;
        Ok(record)
    }

    /// Bulk-creates the template seed rows for a freshly created entity.
    ///
    /// The entity's chart is empty at this point, so no duplicate check is
    /// needed; template codes are unique by construction. Returns the
    /// number of accounts created.
    pub async fn seed_from_template(
        &self,
        entity_id: EntityId,
        seeds: &[SeedAccount],
    ) -> Result<usize, StoreError> {
        for seed in seeds {
            let record = AccountRecord {
                id: AccountId::new(),
                entity_id,
                code: seed.code.to_string(),
                name: seed.name.to_string(),
                classification: seed.classification,
                category: seed.category.to_string(),
                opening_balance: Decimal::ZERO,
                current_balance: Decimal::ZERO,
                active: true,
            };
            self.upsert(&record).await?;
        }
        Ok(seeds.len())
    }

    /// Finds an entity's active account by code.
    pub async fn find_by_code(
        &self,
        entity_id: EntityId,
        code: &str,
    ) -> Result<Option<AccountRecord>, StoreError> {
        self.handle
            .find_one(
                Collection::Accounts,
                &Filter::new()
                    .eq("entity_id", json!(entity_id))
                    .eq("code", json!(code))
                    .active_only(),
            )
            .await
    }

    /// Lists an entity's active accounts, in chart (creation) order.
    pub async fn list_active(&self, entity_id: EntityId) -> Result<Vec<AccountRecord>, StoreError> {
        self.handle
            .find_many(
                Collection::Accounts,
                &Filter::new().eq("entity_id", json!(entity_id)).active_only(),
            )
            .await
    }

    /// Replaces an account's current balance.
    pub async fn set_balance(
        &self,
        account: &AccountRecord,
        balance: Decimal,
    ) -> Result<AccountRecord, StoreError> {
        let updated = AccountRecord {
            current_balance: balance,
            ..account.clone()
        };
        self.upsert(&updated).await?;
        Ok(updated)
    }

    /// Soft-deactivates an account.
    pub async fn deactivate(&self, account_id: AccountId) -> Result<bool, StoreError> {
        self.handle
            .deactivate(Collection::Accounts, &account_id.to_string())
            .await
    }

    async fn upsert(&self, record: &AccountRecord) -> Result<(), StoreError> {
        self.handle
            .upsert(Collection::Accounts, &record.id.to_string(), record)
            .await
    }
}
