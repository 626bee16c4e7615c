use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use accounts_core::{RevokedTokenStore, RevokedTokenStoreError};

/// In-memory revocation list for tests. Entries never expire; the TTL only
/// matters for the Redis-backed store.
#[derive(Debug, Default, Clone)]
pub struct HashSetRevokedTokenStore {
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl HashSetRevokedTokenStore {
    pub fn new() -> Self {
        Self {
            revoked: Arc::new(RwLock::new(HashSet::new())),
        }
    }
}

#[async_trait::async_trait]
impl RevokedTokenStore for HashSetRevokedTokenStore {
    async fn revoke(&self, jti: String, _ttl_seconds: u64) -> Result<(), RevokedTokenStoreError> {
        let mut revoked = self.revoked.write().await;
        revoked.insert(jti);
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, RevokedTokenStoreError> {
        let revoked = self.revoked.read().await;
        Ok(revoked.contains(jti))
    }
}
