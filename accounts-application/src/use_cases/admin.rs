use accounts_core::{UserStore, UserStoreError};
use uuid::Uuid;

/// Bulk account administration. No HTTP surface; intended for admin tooling
/// and batch scripts, which therefore share the store-level guards.
pub struct BulkUserAdmin<U>
where
    U: UserStore,
{
    user_store: U,
}

impl<U> BulkUserAdmin<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "BulkUserAdmin::activate", skip_all)]
    pub async fn activate(&self, ids: &[Uuid]) -> Result<u64, UserStoreError> {
        self.user_store.set_active(ids, true).await
    }

    #[tracing::instrument(name = "BulkUserAdmin::deactivate", skip_all)]
    pub async fn deactivate(&self, ids: &[Uuid]) -> Result<u64, UserStoreError> {
        self.user_store.set_active(ids, false).await
    }

    #[tracing::instrument(name = "BulkUserAdmin::grant_staff", skip_all)]
    pub async fn grant_staff(&self, ids: &[Uuid]) -> Result<u64, UserStoreError> {
        self.user_store.set_staff(ids, true).await
    }

    /// Superusers are skipped: bulk revocation never strips their staff
    /// status. The guard lives in the store so every caller inherits it.
    #[tracing::instrument(name = "BulkUserAdmin::revoke_staff", skip_all)]
    pub async fn revoke_staff(&self, ids: &[Uuid]) -> Result<u64, UserStoreError> {
        self.user_store.set_staff(ids, false).await
    }
}
