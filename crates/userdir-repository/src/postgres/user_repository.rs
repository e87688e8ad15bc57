//! Postgres user repository implementation.

use crate::pool::DatabasePool;
use crate::traits::{UpdateUserFields, UserRepository};
use async_trait::async_trait;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use userdir_core::{User, UserdirResult};
use uuid::Uuid;

/// Postgres user repository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Arc<DatabasePool>,
}

impl PgUserRepository {
    /// Creates a new Postgres user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    uuid: Uuid,
    username: String,
    email: String,
    full_name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            uuid: row.uuid,
            username: row.username,
            email: row.email,
            full_name: row.full_name,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> UserdirResult<Vec<User>> {
        debug!("Fetching all users");

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, uuid, username, email, full_name
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_username(&self, username: &str) -> UserdirResult<Option<User>> {
        debug!("Finding user by username: {}", username);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, uuid, username, email, full_name
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_id(&self, id: i64) -> UserdirResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, uuid, username, email, full_name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> UserdirResult<Option<User>> {
        debug!("Finding user by uuid: {}", uuid);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, uuid, username, email, full_name
            FROM users
            WHERE uuid = $1
            "#,
        )
        .bind(uuid)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn create(&self, username: &str, email: &str, full_name: &str) -> UserdirResult<User> {
        debug!("Creating user: {}", username);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, email, full_name)
            VALUES ($1, $2, $3)
            RETURNING id, uuid, username, email, full_name
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(full_name)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(User::from(row))
    }

    async fn update_by_uuid(
        &self,
        uuid: Uuid,
        fields: UpdateUserFields,
    ) -> UserdirResult<Option<User>> {
        debug!("Updating user by uuid: {}", uuid);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = $1, email = $2, full_name = $3
            WHERE uuid = $4
            RETURNING id, uuid, username, email, full_name
            "#,
        )
        .bind(&fields.username)
        .bind(&fields.email)
        .bind(&fields.full_name)
        .bind(uuid)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn update_by_id(&self, id: i64, fields: UpdateUserFields) -> UserdirResult<Option<User>> {
        debug!("Updating user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = $1, email = $2, full_name = $3
            WHERE id = $4
            RETURNING id, uuid, username, email, full_name
            "#,
        )
        .bind(&fields.username)
        .bind(&fields.email)
        .bind(&fields.full_name)
        .bind(id)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn delete_by_uuid(&self, uuid: Uuid) -> UserdirResult<bool> {
        debug!("Deleting user by uuid: {}", uuid);

        let result = sqlx::query("DELETE FROM users WHERE uuid = $1")
            .bind(uuid)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: i64) -> UserdirResult<bool> {
        debug!("Deleting user by id: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
