/// PostgreSQL-backed repository
///
/// Delegates to the queries on [`User`]; errors surface as
/// [`RepositoryError::Database`].

use super::{RepositoryResult, UserRepository};
use crate::db::pool;
use crate::models::user::{User, UserPayload};
use async_trait::async_trait;
use sqlx::PgPool;

/// User repository over a sqlx connection pool
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool, e.g. for closing it on shutdown
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self) -> RepositoryResult<Vec<User>> {
        Ok(User::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        Ok(User::find_by_id(&self.pool, id).await?)
    }

    async fn create(&self, data: UserPayload) -> RepositoryResult<User> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn update(&self, id: i64, data: UserPayload) -> RepositoryResult<Option<User>> {
        Ok(User::update(&self.pool, id, data).await?)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        Ok(User::delete(&self.pool, id).await?)
    }

    async fn count(&self) -> RepositoryResult<i64> {
        Ok(User::count(&self.pool).await?)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(pool::health_check(&self.pool).await?)
    }
}
