pub mod auth;
pub mod config;
pub mod http;
pub mod persistence;

// Re-export commonly used adapters at the crate root
pub use auth::{JwtIssuerConfig, JwtTokenIssuer};
pub use persistence::{
    HashMapUserStore, HashSetRevokedTokenStore, PostgresUserStore, RedisRevokedTokenStore,
};
