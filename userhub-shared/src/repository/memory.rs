/// In-memory repository
///
/// Records live in a `BTreeMap` keyed by id behind an async `RwLock`, so
/// listing is naturally ordered. Ids start at 1 and are never reused, even
/// after the highest one is deleted.

use super::{RepositoryResult, UserRepository};
use crate::models::user::{User, UserPayload};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, User>,
    last_id: i64,
}

/// Process-local user store
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: RwLock<Table>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> RepositoryResult<Vec<User>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn create(&self, data: UserPayload) -> RepositoryResult<User> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let user = User::from_payload(table.last_id, data);
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, data: UserPayload) -> RepositoryResult<Option<User>> {
        let mut table = self.table.write().await;

        Ok(table.rows.get_mut(&id).map(|user| {
            *user = User::from_payload(id, data);
            user.clone()
        }))
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id).is_some())
    }

    async fn count(&self) -> RepositoryResult<i64> {
        let table = self.table.read().await;
        Ok(table.rows.len() as i64)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
