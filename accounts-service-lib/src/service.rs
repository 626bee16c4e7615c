use accounts_adapters::{
    auth::{JwtIssuerConfig, JwtTokenIssuer},
    config::AllowedOrigins,
    http::routes::{change_password, get_profile, login, logout, signup, update_profile},
};
use accounts_core::{RevokedTokenStore, UserStore};
use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Main account service that provides all auth-related routes
pub struct AccountService {
    router: Router,
}

impl AccountService {
    /// Create a new AccountService with the provided stores.
    ///
    /// # Note on Architecture
    /// Stores implement Clone via internal shared handles (pool, DashMap,
    /// connection). Each route is given its specific state requirements,
    /// avoiding unnecessary cloning.
    pub fn new<U, B>(
        user_store: U,
        revoked_token_store: B,
        issuer_config: JwtIssuerConfig,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        B: RevokedTokenStore + Clone + 'static,
    {
        let token_issuer = JwtTokenIssuer::new(revoked_token_store, issuer_config);

        let router = Router::new()
            // Signup and login issue the first token pair
            .route("/api/auth/signup/", post(signup::<U, JwtTokenIssuer<B>>))
            .with_state((user_store.clone(), token_issuer.clone()))
            .route("/api/auth/login/", post(login::<U, JwtTokenIssuer<B>>))
            .with_state((user_store.clone(), token_issuer.clone()))
            // Logout only needs the issuer (it owns the revocation store)
            .route("/api/auth/logout/", post(logout::<JwtTokenIssuer<B>>))
            .with_state(token_issuer.clone())
            .route(
                "/api/auth/profile/",
                get(get_profile::<U, JwtTokenIssuer<B>>)
                    .put(update_profile::<U, JwtTokenIssuer<B>>),
            )
            .with_state((user_store.clone(), token_issuer.clone()))
            .route(
                "/api/auth/password/change/",
                post(change_password::<U, JwtTokenIssuer<B>>),
            )
            .with_state((user_store, token_issuer));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AccountService into a router that can be mounted on
    /// another application.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));
            self.router = self.router.layer(cors);
        }

        self.with_trace_layer().router
    }

    /// Run as a standalone server on the given listener.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let address = listener.local_addr()?;
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Account service listening on {}", address);
        axum::serve(listener, router).await
    }
}
