pub mod helpers;
pub mod service;
pub mod tracing;

pub use helpers::{configure_postgresql, configure_redis, get_postgres_pool, get_redis_client};
pub use service::AccountService;
