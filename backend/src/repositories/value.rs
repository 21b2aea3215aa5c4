//! Values repository: plain reads, no business rules

use super::StoreError;
use async_trait::async_trait;
use dating_api_shared::types::ValueResponse;
use sqlx::PgPool;

/// Value record from database
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ValueRecord {
    pub id: i32,
    pub name: String,
}

impl From<ValueRecord> for ValueResponse {
    fn from(record: ValueRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
        }
    }
}

#[async_trait]
pub trait ValueStore: Send + Sync {
    async fn list(&self) -> Result<Vec<ValueRecord>, StoreError>;

    async fn find(&self, id: i32) -> Result<Option<ValueRecord>, StoreError>;
}

/// PostgreSQL-backed values store
#[derive(Clone)]
pub struct PgValueStore {
    pool: PgPool,
}

impl PgValueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ValueStore for PgValueStore {
    async fn list(&self) -> Result<Vec<ValueRecord>, StoreError> {
        let values = sqlx::query_as::<_, ValueRecord>(
            r#"
            SELECT id, name FROM "values" ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(values)
    }

    async fn find(&self, id: i32) -> Result<Option<ValueRecord>, StoreError> {
        let value = sqlx::query_as::<_, ValueRecord>(
            r#"
            SELECT id, name FROM "values" WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value)
    }
}
