//! Postgres API key repository implementation.

use crate::pool::DatabasePool;
use crate::traits::ApiKeyRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use userdir_core::{ApiKey, UserdirResult};

/// Postgres API key repository — the credential store gateway.
#[derive(Clone)]
pub struct PgApiKeyRepository {
    pool: Arc<DatabasePool>,
}

impl PgApiKeyRepository {
    /// Creates a new Postgres API key repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of an API key.
#[derive(Debug, FromRow)]
struct ApiKeyRow {
    id: i64,
    key_hash: String,
    client_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ApiKeyRow> for ApiKey {
    fn from(row: ApiKeyRow) -> Self {
        Self {
            id: row.id,
            key_hash: row.key_hash,
            client_name: row.client_name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ApiKeyRepository for PgApiKeyRepository {
    async fn find_by_hash(&self, hash: &str) -> UserdirResult<Option<ApiKey>> {
        debug!("Looking up api key by hash");

        let row = sqlx::query_as::<_, ApiKeyRow>(
            r#"
            SELECT id, key_hash, client_name, created_at, updated_at
            FROM api_keys
            WHERE key_hash = $1
            "#,
        )
        .bind(hash)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(ApiKey::from))
    }
}
