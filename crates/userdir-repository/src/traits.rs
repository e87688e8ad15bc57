//! Repository trait definitions.

use async_trait::async_trait;
use userdir_core::{ApiKey, User, UserdirResult};
use uuid::Uuid;

/// Full set of columns written by an update.
///
/// The service layer resolves patch semantics before calling the
/// repository, so updates always carry every field.
#[derive(Debug, Clone)]
pub struct UpdateUserFields {
    pub username: String,
    pub email: String,
    pub full_name: String,
}

/// User repository trait.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetches all users.
    async fn find_all(&self) -> UserdirResult<Vec<User>>;

    /// Finds a user by username.
    async fn find_by_username(&self, username: &str) -> UserdirResult<Option<User>>;

    /// Finds a user by sequential id.
    async fn find_by_id(&self, id: i64) -> UserdirResult<Option<User>>;

    /// Finds a user by UUID.
    async fn find_by_uuid(&self, uuid: Uuid) -> UserdirResult<Option<User>>;

    /// Inserts a new user and returns the stored row.
    async fn create(&self, username: &str, email: &str, full_name: &str) -> UserdirResult<User>;

    /// Updates a user addressed by UUID. Returns `None` when no row matched.
    async fn update_by_uuid(&self, uuid: Uuid, fields: UpdateUserFields)
        -> UserdirResult<Option<User>>;

    /// Updates a user addressed by id. Returns `None` when no row matched.
    async fn update_by_id(&self, id: i64, fields: UpdateUserFields) -> UserdirResult<Option<User>>;

    /// Deletes a user by UUID. Returns whether a row was deleted.
    async fn delete_by_uuid(&self, uuid: Uuid) -> UserdirResult<bool>;

    /// Deletes a user by id. Returns whether a row was deleted.
    async fn delete_by_id(&self, id: i64) -> UserdirResult<bool>;
}

/// API key repository trait — the credential store gateway.
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// Finds a key record by its SHA-256 hash.
    ///
    /// Returns `Ok(None)` when no record matches; only a storage-access
    /// failure produces an `Err`.
    async fn find_by_hash(&self, hash: &str) -> UserdirResult<Option<ApiKey>>;
}
