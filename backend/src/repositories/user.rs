//! User repository for database operations

use super::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// User record from database
///
/// Carries the password digest, so it must not leave the credential store.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: i32,
    pub username: String,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Already normalized
    pub username: String,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
}

/// Persistence contract for user records
///
/// All usernames passed in are expected to be normalized by the caller.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Check if a username is taken
    async fn exists(&self, username: &str) -> Result<bool, StoreError>;

    /// Insert a user, returning `StoreError::Duplicate` if the username is taken
    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<UserRecord>, StoreError>;

    /// Verify the backing storage is reachable
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn exists(&self, username: &str) -> Result<bool, StoreError> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    async fn create(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        // The UNIQUE constraint on users.username is the final arbiter when
        // two registrations race past the existence check.
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, password_hash, password_salt)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash, password_salt, created_at, last_active
            "#,
        )
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&user.password_salt)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_write)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, password_hash, password_salt, created_at, last_active
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, username, password_hash, password_salt, created_at, last_active
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::db::health_check(&self.pool)
            .await
            .map_err(StoreError::Database)
    }
}
