//! Database repositories
//!
//! Provides the data access layer. Each store is a trait so the
//! credential logic can run against PostgreSQL or the in-memory store.

pub mod memory;
pub mod user;
pub mod value;

use thiserror::Error;

pub use memory::InMemoryStore;
pub use user::{NewUser, PgUserStore, UserRecord, UserStore};
pub use value::{PgValueStore, ValueRecord, ValueStore};

/// Storage-level failures
#[derive(Error, Debug)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("record already exists")]
    Duplicate,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Translate a sqlx error, surfacing unique-constraint violations as `Duplicate`
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return StoreError::Duplicate;
            }
        }
        StoreError::Database(err)
    }
}
