//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction. It is built once
//! at startup and is read-only afterwards.

use crate::auth::JwtService;
use crate::repositories::{PgUserStore, PgValueStore, UserStore, ValueStore};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
///
/// All fields are `Arc`s or Arc-backed, so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    /// User persistence
    pub users: Arc<dyn UserStore>,
    /// Values persistence
    pub values: Arc<dyn ValueStore>,
    /// Token issuer with keys derived from the configured secret
    pub jwt: JwtService,
}

impl AppState {
    /// Assemble state from stores and an already-keyed token issuer.
    ///
    /// The issuer is built by the caller so a missing secret is reported
    /// before any store is opened.
    pub fn new(
        users: Arc<dyn UserStore>,
        values: Arc<dyn ValueStore>,
        jwt: JwtService,
    ) -> Self {
        Self { users, values, jwt }
    }

    /// Create state backed by PostgreSQL
    pub fn with_pool(pool: PgPool, jwt: JwtService) -> Self {
        Self::new(
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgValueStore::new(pool)),
            jwt,
        )
    }

    #[inline]
    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    #[inline]
    pub fn values(&self) -> &dyn ValueStore {
        self.values.as_ref()
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
