use std::sync::Arc;

use accounts_core::{RevokedTokenStore, RevokedTokenStoreError};
use redis::{Commands, Connection};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct RedisRevokedTokenStore {
    conn: Arc<Mutex<Connection>>,
}

impl RedisRevokedTokenStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl RevokedTokenStore for RedisRevokedTokenStore {
    #[tracing::instrument(name = "Revoking token in Redis", skip_all)]
    async fn revoke(&self, jti: String, ttl_seconds: u64) -> Result<(), RevokedTokenStoreError> {
        let key = get_key(&jti);

        let mut conn = self.conn.lock().await;
        conn.set_ex(key, true, ttl_seconds)
            .map_err(|e| RevokedTokenStoreError::DatabaseError(e.to_string()))
    }

    #[tracing::instrument(name = "Checking revoked token in Redis", skip_all)]
    async fn is_revoked(&self, jti: &str) -> Result<bool, RevokedTokenStoreError> {
        let key = get_key(jti);
        let mut conn = self.conn.lock().await;
        conn.exists(&key)
            .map_err(|e| RevokedTokenStoreError::DatabaseError(e.to_string()))
    }
}

// Key prefix prevents collisions with other keys in the same Redis instance.
const REVOKED_TOKEN_KEY_PREFIX: &str = "revoked_token:";

fn get_key(jti: &str) -> String {
    format!("{}{}", REVOKED_TOKEN_KEY_PREFIX, jti)
}
