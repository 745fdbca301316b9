//! Onboarding: the one-time creation of a tenant.
//!
//! Completing onboarding creates, in order: the write-once partition
//! assignment (which also rejects repeat onboarding), the parent entity
//! inside the new partition, and the entity's seeded chart of accounts.
//! Each write commits independently; the assignment goes first so a repeat
//! attempt can never create a second partition.

use vantra_core::accounts::ReferenceDataProvider;
use vantra_core::entity::{CompanyEntity, EntityClassification};
use vantra_shared::types::{CurrencyCode, EntityId};
use vantra_store::repositories::{AccountRepository, EntityRepository, NewParentInput};
use vantra_store::{AssignmentError, PartitionHandle, StoreError, TenantResolver};

/// Input for completing onboarding.
#[derive(Debug, Clone)]
pub struct OnboardingInput {
    /// Parent company display name.
    pub company_name: String,
    /// ISO country code; selects the chart-of-accounts template.
    pub country: String,
    /// The company's functional currency.
    pub base_currency: CurrencyCode,
    /// Business classification; `Group` enables sisters and consolidation.
    pub classification: EntityClassification,
}

/// Errors from onboarding.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    /// The user already completed onboarding; a user onboards exactly once.
    #[error("user '{0}' has already completed onboarding")]
    AlreadyCompleted(String),

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<AssignmentError> for OnboardingError {
    fn from(err: AssignmentError) -> Self {
        match err {
            AssignmentError::AlreadyAssigned(user) => Self::AlreadyCompleted(user),
            AssignmentError::Store(e) => Self::Store(e),
        }
    }
}

/// Runs the onboarding flow for a user.
pub(crate) async fn complete(
    tenants: &TenantResolver,
    templates: &dyn ReferenceDataProvider,
    user_identity: &str,
    input: OnboardingInput,
) -> Result<(CompanyEntity, PartitionHandle), OnboardingError> {
    let entity_id = EntityId::new();
    let partition = tenants.assign(user_identity, entity_id).await?;

    let entity = EntityRepository::new(partition.clone())
        .create_parent(
            entity_id,
            NewParentInput {
                name: input.company_name,
                country: input.country.clone(),
                base_currency: input.base_currency,
                classification: input.classification,
            },
        )
        .await?;

    let seeds = templates.seed_accounts(templates.template_for_country(&input.country));
    let seeded = AccountRepository::new(partition.clone())
        .seed_from_template(entity_id, &seeds)
        .await?;

    tracing::info!(
        user = user_identity,
        entity = %entity_id,
        partition = %partition.partition(),
        accounts = seeded,
        "onboarding completed"
    );
    Ok((entity, partition))
}
