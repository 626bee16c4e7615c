pub mod hashmap_user_store;
pub mod hashset_revoked_token_store;
pub mod postgres_user_store;
pub mod redis_revoked_token_store;

pub use hashmap_user_store::HashMapUserStore;
pub use hashset_revoked_token_store::HashSetRevokedTokenStore;
pub use postgres_user_store::PostgresUserStore;
pub use redis_revoked_token_store::RedisRevokedTokenStore;
