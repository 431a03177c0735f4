/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use userhub_api::{app::AppState, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let (state, _pool) = AppState::connect(config).await?;
/// let app = userhub_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::{Config, StorageConfig};
use crate::middleware::security::SecurityHeadersLayer;
use crate::routes;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use userhub_shared::{
    db::{pool, schema},
    repository::{InMemoryUserRepository, PgUserRepository, UserRepository},
    validation::{SchemaValidator, UserValidator},
};

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// User store
    pub users: Arc<dyn UserRepository>,

    /// Request body validator
    pub validator: Arc<dyn UserValidator>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state from an existing repository and the default validator
    pub fn new(users: Arc<dyn UserRepository>, config: Config) -> Self {
        Self {
            users,
            validator: Arc::new(SchemaValidator),
            config: Arc::new(config),
        }
    }

    /// Replaces the validator
    pub fn with_validator(mut self, validator: Arc<dyn UserValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Opens the configured storage backend
    ///
    /// For Postgres this creates the pool and ensures the `users` table
    /// exists; the pool is returned as well so it can be closed on
    /// shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or the schema
    /// cannot be created
    pub async fn connect(config: Config) -> anyhow::Result<(Self, Option<PgPool>)> {
        match &config.storage {
            StorageConfig::Postgres(db) => {
                let pg = pool::create_pool(pool::DatabaseConfig {
                    url: db.url.clone(),
                    max_connections: db.max_connections,
                    ..Default::default()
                })
                .await?;
                schema::ensure_schema(&pg).await?;

                let users = Arc::new(PgUserRepository::new(pg.clone()));
                Ok((Self::new(users, config), Some(pg)))
            }
            StorageConfig::Memory => {
                tracing::warn!("Using in-memory storage; data will not survive a restart");
                let users = Arc::new(InMemoryUserRepository::new());
                Ok((Self::new(users, config), None))
            }
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                    # Health check
/// └── /api/users/                # User resource
///     ├── GET    /               # List users
///     ├── POST   /               # Create user
///     ├── PUT    /               # 400, no id
///     ├── DELETE /               # 404, no id
///     ├── GET    /{id}/          # Retrieve user
///     ├── PUT    /{id}/          # Replace user
///     └── DELETE /{id}/          # Delete user
/// ```
///
/// Every user path is served with and without the trailing slash.
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
pub fn build_router(state: AppState) -> Router {
    let collection = get(routes::users::list_users)
        .post(routes::users::create_user)
        .put(routes::users::update_without_id)
        .delete(routes::users::delete_without_id);

    let item = get(routes::users::get_user)
        .put(routes::users::update_user)
        .delete(routes::users::delete_user);

    let user_routes = Router::new()
        .route("/api/users", collection.clone())
        .route("/api/users/", collection)
        .route("/api/users/:id", item.clone())
        .route("/api/users/:id/", item);

    let cors = if state.config.allows_any_origin() {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    let production = state.config.api.production;

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(user_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(production))
        .with_state(state)
}
