/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use intelmed_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let app = build_router(AppState::with_pool(pool, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::with_security_headers, routes};
use axum::{
    routing::{get, post},
    Router,
};
use intelmed_shared::registration::{PgRegistrationStore, RegistrationStore};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connector the registration workflow writes through
    pub store: Arc<dyn RegistrationStore>,

    /// Caps concurrent password hashes across all requests
    pub hash_permits: Arc<Semaphore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state around any store implementation
    pub fn new(store: Arc<dyn RegistrationStore>, config: Config) -> Self {
        Self {
            store,
            hash_permits: Arc::new(Semaphore::new(config.api.max_concurrent_hashes)),
            config: Arc::new(config),
        }
    }

    /// Creates state backed by PostgreSQL
    pub fn with_pool(pool: PgPool, config: Config) -> Self {
        Self::new(Arc::new(PgRegistrationStore::new(pool)), config)
    }
}

/// Builds the Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /health               # Liveness (always 200)
/// ├── GET  /ready                # Readiness (503 when the database is down)
/// ├── POST {registration_path}   # Patient registration form, answers with a redirect
/// │   └── any other method       # No-op, empty 200
/// └── *                          # STATIC_DIR files, when configured
/// ```
pub fn build_router(state: AppState) -> Router {
    let registration = post(routes::patients::submit_registration)
        .fallback(routes::patients::ignore_non_post);

    let mut router = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/ready", get(routes::health::readiness))
        .route(&state.config.api.registration_path, registration);

    if let Some(dir) = &state.config.api.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    let router = router.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    with_security_headers(router, state.config.api.production).with_state(state)
}
