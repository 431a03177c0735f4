//! Common test utilities for integration tests
//!
//! Builds the full router over an in-memory repository so the HTTP
//! contract can be exercised without a database.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::Service as _;
use userhub_api::app::{build_router, AppState};
use userhub_api::config::Config;
use userhub_shared::error::RepositoryError;
use userhub_shared::models::user::{User, UserPayload};
use userhub_shared::repository::{InMemoryUserRepository, RepositoryResult, UserRepository};
use userhub_shared::validation::UserValidator;

/// Test context containing the app and direct access to its store
pub struct TestContext {
    pub app: axum::Router,
    pub users: Arc<dyn UserRepository>,
}

impl TestContext {
    /// Creates a context with an empty in-memory store
    pub fn new() -> Self {
        Self::with_repository(Arc::new(InMemoryUserRepository::new()))
    }

    /// Creates a context over any repository
    pub fn with_repository(users: Arc<dyn UserRepository>) -> Self {
        let state = AppState::new(users.clone(), test_config());
        Self {
            app: build_router(state),
            users,
        }
    }

    /// Creates a context over an empty in-memory store with a custom
    /// validator in place of the schema one
    pub fn with_validator(validator: Arc<dyn UserValidator>) -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        let state = AppState::new(users.clone(), test_config()).with_validator(validator);
        Self {
            app: build_router(state),
            users,
        }
    }

    /// Inserts a user directly into the store
    pub async fn create_user(&self, first_name: &str, last_name: &str, email: &str) -> User {
        self.users
            .create(UserPayload {
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                email: email.to_string(),
            })
            .await
            .expect("Failed to create test user")
    }

    /// Sends a request and returns the status and JSON body (Null if empty)
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.send_request(builder.body(body).unwrap()).await
    }

    /// Sends a prebuilt request
    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn count(&self) -> i64 {
        self.users.count().await.unwrap()
    }
}

/// Configuration that needs no environment or database
pub fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "STORAGE_BACKEND" => Some("memory".to_string()),
        _ => None,
    })
    .expect("test config")
}

/// Sample payload used across tests
pub fn user_data() -> Value {
    serde_json::json!({
        "first_name": "Abubakkar",
        "last_name": "Arshad",
        "email": "abubakkar.arshad@example.com",
    })
}

/// Repository whose every call fails, as a dropped database would
pub struct FailingRepository;

fn unavailable() -> RepositoryError {
    RepositoryError::Database(sqlx::Error::PoolClosed)
}

#[async_trait]
impl UserRepository for FailingRepository {
    async fn list(&self) -> RepositoryResult<Vec<User>> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: i64) -> RepositoryResult<Option<User>> {
        Err(unavailable())
    }

    async fn create(&self, _data: UserPayload) -> RepositoryResult<User> {
        Err(unavailable())
    }

    async fn update(&self, _id: i64, _data: UserPayload) -> RepositoryResult<Option<User>> {
        Err(unavailable())
    }

    async fn delete(&self, _id: i64) -> RepositoryResult<bool> {
        Err(unavailable())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Err(unavailable())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Err(unavailable())
    }
}
