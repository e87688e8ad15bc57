//! User CRUD service.

use crate::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use userdir_core::{User, UserdirError, UserdirResult};
use userdir_repository::{UpdateUserFields, UserRepository};
use uuid::Uuid;
use validator::ValidateEmail;

const INVALID_INPUT: &str = "invalid user input";
const ALREADY_EXISTS: &str = "user already exists";

/// User service trait.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Lists all users.
    async fn get_all(&self) -> UserdirResult<Vec<UserResponse>>;

    /// Gets a user by username.
    async fn get_by_username(&self, username: &str) -> UserdirResult<UserResponse>;

    /// Gets a user by sequential id.
    async fn get_by_id(&self, id: i64) -> UserdirResult<UserResponse>;

    /// Gets a user by UUID.
    async fn get_by_uuid(&self, uuid: Uuid) -> UserdirResult<UserResponse>;

    /// Creates a new user.
    async fn create(&self, request: CreateUserRequest) -> UserdirResult<UserResponse>;

    /// Patches a user addressed by UUID.
    async fn update_by_uuid(
        &self,
        uuid: Uuid,
        request: UpdateUserRequest,
    ) -> UserdirResult<UserResponse>;

    /// Patches a user addressed by id.
    async fn update_by_id(&self, id: i64, request: UpdateUserRequest)
        -> UserdirResult<UserResponse>;

    /// Deletes a user by UUID.
    async fn delete_by_uuid(&self, uuid: Uuid) -> UserdirResult<()>;

    /// Deletes a user by id.
    async fn delete_by_id(&self, id: i64) -> UserdirResult<()>;
}

/// User service implementation over a [`UserRepository`].
pub struct UserServiceImpl<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserServiceImpl<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

/// Resolves patch semantics against the existing row.
///
/// Provided username/email must be non-empty after trimming and the email
/// must parse; a provided full name may be blank.
fn merge_update(existing: &User, request: &UpdateUserRequest) -> UserdirResult<UpdateUserFields> {
    let mut fields = UpdateUserFields {
        username: existing.username.clone(),
        email: existing.email.clone(),
        full_name: existing.full_name.clone(),
    };

    if let Some(username) = &request.username {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            warn!("update rejected: blank username");
            return Err(UserdirError::validation(INVALID_INPUT));
        }
        fields.username = trimmed.to_string();
    }

    if let Some(email) = &request.email {
        let trimmed = email.trim();
        if trimmed.is_empty() || !trimmed.validate_email() {
            warn!("update rejected: invalid email");
            return Err(UserdirError::validation(INVALID_INPUT));
        }
        fields.email = trimmed.to_string();
    }

    if let Some(full_name) = &request.full_name {
        fields.full_name = full_name.trim().to_string();
    }

    Ok(fields)
}

/// Re-labels a storage unique violation with the stable client message.
fn map_conflict(err: UserdirError) -> UserdirError {
    match err {
        UserdirError::Conflict(_) => UserdirError::conflict(ALREADY_EXISTS),
        other => other,
    }
}

#[async_trait]
impl<R: UserRepository + 'static> UserService for UserServiceImpl<R> {
    async fn get_all(&self) -> UserdirResult<Vec<UserResponse>> {
        let users = self.repository.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    async fn get_by_username(&self, username: &str) -> UserdirResult<UserResponse> {
        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                debug!(username, "user by username not found");
                UserdirError::not_found("user")
            })?;
        Ok(UserResponse::from(user))
    }

    async fn get_by_id(&self, id: i64) -> UserdirResult<UserResponse> {
        let user = self.repository.find_by_id(id).await?.ok_or_else(|| {
            debug!(id, "user by id not found");
            UserdirError::not_found("user")
        })?;
        Ok(UserResponse::from(user))
    }

    async fn get_by_uuid(&self, uuid: Uuid) -> UserdirResult<UserResponse> {
        let user = self.repository.find_by_uuid(uuid).await?.ok_or_else(|| {
            debug!(%uuid, "user by uuid not found");
            UserdirError::not_found("user")
        })?;
        Ok(UserResponse::from(user))
    }

    async fn create(&self, request: CreateUserRequest) -> UserdirResult<UserResponse> {
        let username = request.username.trim();
        let email = request.email.trim();
        let full_name = request.full_name.trim();

        if username.is_empty() || full_name.is_empty() {
            warn!("create user rejected: missing username or full name");
            return Err(UserdirError::validation(INVALID_INPUT));
        }
        if !email.validate_email() {
            warn!("create user rejected: invalid email format");
            return Err(UserdirError::validation(INVALID_INPUT));
        }

        let user = self
            .repository
            .create(username, email, full_name)
            .await
            .map_err(map_conflict)?;

        info!(user.id, %user.uuid, "user created");
        Ok(UserResponse::from(user))
    }

    async fn update_by_uuid(
        &self,
        uuid: Uuid,
        request: UpdateUserRequest,
    ) -> UserdirResult<UserResponse> {
        if request.is_empty() {
            warn!(%uuid, "update rejected: no fields provided");
            return Err(UserdirError::validation(INVALID_INPUT));
        }

        let existing = self
            .repository
            .find_by_uuid(uuid)
            .await?
            .ok_or(UserdirError::not_found("user"))?;

        let fields = merge_update(&existing, &request)?;

        let updated = self
            .repository
            .update_by_uuid(uuid, fields)
            .await
            .map_err(map_conflict)?
            .ok_or(UserdirError::not_found("user"))?;

        info!(updated.id, %uuid, "user updated by uuid");
        Ok(UserResponse::from(updated))
    }

    async fn update_by_id(
        &self,
        id: i64,
        request: UpdateUserRequest,
    ) -> UserdirResult<UserResponse> {
        if id <= 0 {
            warn!(id, "update rejected: non-positive id");
            return Err(UserdirError::validation(INVALID_INPUT));
        }
        if request.is_empty() {
            warn!(id, "update rejected: no fields provided");
            return Err(UserdirError::validation(INVALID_INPUT));
        }

        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserdirError::not_found("user"))?;

        let fields = merge_update(&existing, &request)?;

        let updated = self
            .repository
            .update_by_id(id, fields)
            .await
            .map_err(map_conflict)?
            .ok_or(UserdirError::not_found("user"))?;

        info!(id, %updated.uuid, "user updated by id");
        Ok(UserResponse::from(updated))
    }

    async fn delete_by_uuid(&self, uuid: Uuid) -> UserdirResult<()> {
        let deleted = self.repository.delete_by_uuid(uuid).await?;
        if !deleted {
            warn!(%uuid, "delete target not found");
            return Err(UserdirError::not_found("user"));
        }
        info!(%uuid, "user deleted by uuid");
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> UserdirResult<()> {
        if id <= 0 {
            warn!(id, "delete rejected: non-positive id");
            return Err(UserdirError::validation(INVALID_INPUT));
        }

        let deleted = self.repository.delete_by_id(id).await?;
        if !deleted {
            warn!(id, "delete target not found");
            return Err(UserdirError::not_found("user"));
        }
        info!(id, "user deleted by id");
        Ok(())
    }
}
