use std::sync::Arc;

use accounts_adapters::{
    auth::JwtIssuerConfig,
    config::AccountServiceSetting,
    persistence::{PostgresUserStore, RedisRevokedTokenStore},
};
use accounts_service_lib::{AccountService, configure_postgresql, configure_redis};
use color_eyre::eyre::Result;
use tokio::sync::Mutex;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    dotenvy::dotenv().ok();
    let config = AccountServiceSetting::load();

    // Setup database connection pool and run migrations
    let pg_pool = configure_postgresql().await;

    // Setup Redis connection
    let redis_conn = Arc::new(Mutex::new(configure_redis()));

    // Create stores
    let user_store = PostgresUserStore::new(pg_pool);
    let revoked_token_store = RedisRevokedTokenStore::new(redis_conn);

    let issuer_config = JwtIssuerConfig {
        access_secret: config.auth.access_token.secret.clone(),
        refresh_secret: config.auth.refresh_token.secret.clone(),
        access_ttl_seconds: config.auth.access_token.time_to_live,
        refresh_ttl_seconds: config.auth.refresh_token.time_to_live,
    };

    let service = AccountService::new(user_store, revoked_token_store, issuer_config);

    let allowed_origins = (!config.app.allowed_origins.is_empty())
        .then(|| config.app.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&config.app.address).await?;
    service.run_standalone(listener, allowed_origins).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
