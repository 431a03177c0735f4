/// Storage abstraction for user records
///
/// Handlers only see the [`UserRepository`] trait. Two backends ship with
/// the crate:
///
/// - [`PgUserRepository`]: PostgreSQL through a sqlx pool
/// - [`InMemoryUserRepository`]: process-local map, used by tests and the
///   `memory` storage backend
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use userhub_shared::models::user::UserPayload;
/// use userhub_shared::repository::{InMemoryUserRepository, UserRepository};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
///
/// let user = repo
///     .create(UserPayload {
///         first_name: "Ada".to_string(),
///         last_name: "Lovelace".to_string(),
///         email: "ada@example.com".to_string(),
///     })
///     .await?;
///
/// assert!(repo.find_by_id(user.id).await?.is_some());
/// # Ok(())
/// # }
/// ```

mod memory;
mod postgres;

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;

use crate::error::RepositoryError;
use crate::models::user::{User, UserPayload};
use async_trait::async_trait;

/// Repository result type alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// CRUD-by-id and list-all over user records
///
/// Every method is a single round-trip to the store; implementations do
/// not retry.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by id ascending
    async fn list(&self) -> RepositoryResult<Vec<User>>;

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>>;

    /// Persists a new user and returns it with its assigned id
    async fn create(&self, data: UserPayload) -> RepositoryResult<User>;

    /// Replaces every field of user `id`; `None` if it does not exist
    async fn update(&self, id: i64, data: UserPayload) -> RepositoryResult<Option<User>>;

    /// Removes user `id`; `false` if it did not exist
    async fn delete(&self, id: i64) -> RepositoryResult<bool>;

    async fn count(&self) -> RepositoryResult<i64>;

    /// Checks that the store is reachable
    async fn ping(&self) -> RepositoryResult<()>;
}
