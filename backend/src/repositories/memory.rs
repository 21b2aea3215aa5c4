//! In-memory store
//!
//! Implements both store traits over process memory. Used by the test
//! suites and handy for running the API without PostgreSQL.

use super::{NewUser, StoreError, UserRecord, UserStore, ValueRecord, ValueStore};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Users {
    by_id: HashMap<i32, UserRecord>,
    ids_by_username: HashMap<String, i32>,
    last_id: i32,
}

/// Process-local store backing both users and values
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<Users>,
    values: RwLock<Vec<ValueRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with value records
    pub fn with_values(values: Vec<ValueRecord>) -> Self {
        Self {
            users: RwLock::default(),
            values: RwLock::new(values),
        }
    }

    /// Number of stored users
    pub async fn user_count(&self) -> usize {
        self.users.read().await.by_id.len()
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.users.read().await.ids_by_username.contains_key(username))
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        // Check and insert under one write lock, mirroring a UNIQUE constraint
        let mut users = self.users.write().await;
        if users.ids_by_username.contains_key(&user.username) {
            return Err(StoreError::Duplicate);
        }

        users.last_id += 1;
        let now = Utc::now();
        let record = UserRecord {
            id: users.last_id,
            username: user.username,
            password_hash: user.password_hash,
            password_salt: user.password_salt,
            created_at: now,
            last_active: now,
        };

        users
            .ids_by_username
            .insert(record.username.clone(), record.id);
        users.by_id.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .ids_by_username
            .get(username)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.by_id.get(&id).cloned())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl ValueStore for InMemoryStore {
    async fn list(&self) -> Result<Vec<ValueRecord>, StoreError> {
        Ok(self.values.read().await.clone())
    }

    async fn find(&self, id: i32) -> Result<Option<ValueRecord>, StoreError> {
        Ok(self
            .values
            .read()
            .await
            .iter()
            .find(|value| value.id == id)
            .cloned())
    }
}
