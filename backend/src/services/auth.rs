//! Credential store: registration and login
//!
//! Usernames are normalized here before touching storage, and password
//! digests never leave this module; callers only ever see [`User`].

use crate::auth::{PasswordDigest, PasswordService};
use crate::repositories::{NewUser, StoreError, UserRecord, UserStore};
use chrono::{DateTime, Utc};
use dating_api_shared::normalize_username;
use dating_api_shared::types::{UserDetail, UserSummary};
use thiserror::Error;

/// A persisted user, without credential material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            created_at: record.created_at,
            last_active: record.last_active,
        }
    }
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

impl From<User> for UserDetail {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
            last_active: user.last_active,
        }
    }
}

/// Why a login was rejected. Logged, never shown to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailure {
    UnknownUser,
    WrongPassword,
}

/// Credential store failures
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Username already exists")]
    UsernameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials(LoginFailure),

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// User service for authentication operations
pub struct AuthService;

impl AuthService {
    /// Check whether a username is taken, ignoring case
    pub async fn user_exists(store: &dyn UserStore, username: &str) -> Result<bool, AuthError> {
        Ok(store.exists(&normalize_username(username)).await?)
    }

    /// Register a new user.
    ///
    /// Callers are expected to check [`AuthService::user_exists`] first; a
    /// registration that loses a race on the same username still fails
    /// with [`AuthError::UsernameTaken`] via the store's uniqueness check.
    pub async fn register(
        store: &dyn UserStore,
        username: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let PasswordDigest { salt, hash } = PasswordService::hash(password)?;

        let record = store
            .create(NewUser {
                username: normalize_username(username),
                password_hash: hash,
                password_salt: salt,
            })
            .await
            .map_err(|e| match e {
                StoreError::Duplicate => AuthError::UsernameTaken,
                other => AuthError::Storage(other),
            })?;

        Ok(record.into())
    }

    /// Verify a username and password
    pub async fn login(
        store: &dyn UserStore,
        username: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let record = store
            .find_by_username(&normalize_username(username))
            .await?
            .ok_or(AuthError::InvalidCredentials(LoginFailure::UnknownUser))?;

        let digest = PasswordDigest {
            salt: record.password_salt.clone(),
            hash: record.password_hash.clone(),
        };

        if !PasswordService::verify(password, &digest)? {
            return Err(AuthError::InvalidCredentials(LoginFailure::WrongPassword));
        }

        Ok(record.into())
    }

    /// Look up a user by id
    pub async fn find_user(store: &dyn UserStore, id: i32) -> Result<Option<User>, AuthError> {
        Ok(store.find_by_id(id).await?.map(User::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryStore;

    #[tokio::test]
    async fn test_register_then_login() {
        let store = InMemoryStore::new();
        let created = AuthService::register(&store, "bob", "hunter2").await.unwrap();
        let logged_in = AuthService::login(&store, "bob", "hunter2").await.unwrap();

        assert_eq!(created.id, logged_in.id);
        assert_eq!(logged_in.username, "bob");
    }

    #[tokio::test]
    async fn test_username_is_case_insensitive() {
        let store = InMemoryStore::new();
        let created = AuthService::register(&store, "Alice", "wonderland").await.unwrap();

        assert_eq!(created.username, "alice");
        assert!(AuthService::user_exists(&store, "ALICE").await.unwrap());

        let user = AuthService::login(&store, "aLiCe", "wonderland").await.unwrap();
        assert_eq!(user.id, created.id);
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let store = InMemoryStore::new();
        AuthService::register(&store, "bob", "hunter2").await.unwrap();

        let result = AuthService::login(&store, "bob", "wrong").await;
        assert!(matches!(
            result,
            Err(AuthError::InvalidCredentials(LoginFailure::WrongPassword))
        ));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let store = InMemoryStore::new();

        let result = AuthService::login(&store, "ghost", "whatever").await;
        assert!(matches!(
            result,
            Err(AuthError::InvalidCredentials(LoginFailure::UnknownUser))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_registration_is_username_taken() {
        let store = InMemoryStore::new();
        AuthService::register(&store, "bob", "hunter2").await.unwrap();

        let result = AuthService::register(&store, "BOB", "another").await;
        assert!(matches!(result, Err(AuthError::UsernameTaken)));
        assert_eq!(store.user_count().await, 1);

        // The first password still works
        assert!(AuthService::login(&store, "bob", "hunter2").await.is_ok());
    }

    #[tokio::test]
    async fn test_plaintext_never_stored() {
        let store = InMemoryStore::new();
        let user = AuthService::register(&store, "bob", "hunter2").await.unwrap();

        let record = store.find_by_id(user.id).await.unwrap().unwrap();
        assert_ne!(record.password_hash, b"hunter2".to_vec());
        assert!(!record.password_salt.is_empty());
    }
}
