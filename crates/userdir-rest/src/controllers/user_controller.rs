//! User management controller.

use crate::{
    extractors::AuthenticatedClient,
    responses::{created, no_content, ok, ApiResult, AppError, ErrorBody},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::debug;
use userdir_core::UserdirError;
use userdir_service::{CreateUserRequest, UpdateUserRequest, UserResponse};
use uuid::Uuid;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/username/:username", get(get_user_by_username))
        .route(
            "/id/:id",
            get(get_user_by_id)
                .patch(update_user_by_id)
                .delete(delete_user_by_id),
        )
        .route(
            "/uuid/:uuid",
            get(get_user_by_uuid)
                .patch(update_user_by_uuid)
                .delete(delete_user_by_uuid),
        )
}

/// List all users.
#[utoipa::path(
    get,
    path = "/api/v1/users/",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = [UserResponse]),
        (status = 401, description = "Missing api key", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    ),
    security(("api_key" = []))
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<UserResponse>> {
    let users = state.user_service.get_all().await?;
    debug!(count = users.len(), "fetched users");
    ok(users)
}

/// Fetch a user by username.
#[utoipa::path(
    get,
    path = "/api/v1/users/username/{username}",
    tag = "users",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    security(("api_key" = []))
)]
pub async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<UserResponse> {
    let user = state.user_service.get_by_username(&username).await?;
    ok(user)
}

/// Fetch a user by sequential id.
#[utoipa::path(
    get,
    path = "/api/v1/users/id/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    security(("api_key" = []))
)]
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    let id = parse_id(&id)?;
    let user = state.user_service.get_by_id(id).await?;
    ok(user)
}

/// Fetch a user by UUID.
#[utoipa::path(
    get,
    path = "/api/v1/users/uuid/{uuid}",
    tag = "users",
    params(("uuid" = Uuid, Path, description = "User UUID")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Invalid uuid", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    security(("api_key" = []))
)]
pub async fn get_user_by_uuid(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> ApiResult<UserResponse> {
    let uuid = parse_uuid(&uuid)?;
    let user = state.user_service.get_by_uuid(uuid).await?;
    ok(user)
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/api/v1/users/",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 409, description = "User already exists", body = ErrorBody)
    ),
    security(("api_key" = []))
)]
pub async fn create_user(
    State(state): State<AppState>,
    client: AuthenticatedClient,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    debug!(client_name = %client.client_name, username = %request.username, "create user request");

    let user = state.user_service.create(request).await?;
    Ok(created(user))
}

/// Update a user by UUID.
#[utoipa::path(
    patch,
    path = "/api/v1/users/uuid/{uuid}",
    tag = "users",
    params(("uuid" = Uuid, Path, description = "User UUID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 409, description = "User already exists", body = ErrorBody)
    ),
    security(("api_key" = []))
)]
pub async fn update_user_by_uuid(
    State(state): State<AppState>,
    client: AuthenticatedClient,
    Path(uuid): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    let uuid = parse_uuid(&uuid)?;
    debug!(client_name = %client.client_name, %uuid, "update user request");

    let user = state.user_service.update_by_uuid(uuid, request).await?;
    ok(user)
}

/// Update a user by id.
#[utoipa::path(
    patch,
    path = "/api/v1/users/id/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 409, description = "User already exists", body = ErrorBody)
    ),
    security(("api_key" = []))
)]
pub async fn update_user_by_id(
    State(state): State<AppState>,
    client: AuthenticatedClient,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<UserResponse> {
    let id = parse_id(&id)?;
    debug!(client_name = %client.client_name, id, "update user request");

    let user = state.user_service.update_by_id(id, request).await?;
    ok(user)
}

/// Delete a user by UUID.
#[utoipa::path(
    delete,
    path = "/api/v1/users/uuid/{uuid}",
    tag = "users",
    params(("uuid" = Uuid, Path, description = "User UUID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid uuid", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    security(("api_key" = []))
)]
pub async fn delete_user_by_uuid(
    State(state): State<AppState>,
    client: AuthenticatedClient,
    Path(uuid): Path<String>,
) -> Result<StatusCode, AppError> {
    let uuid = parse_uuid(&uuid)?;
    debug!(client_name = %client.client_name, %uuid, "delete user request");

    state.user_service.delete_by_uuid(uuid).await?;
    Ok(no_content())
}

/// Delete a user by id.
#[utoipa::path(
    delete,
    path = "/api/v1/users/id/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "User not found", body = ErrorBody)
    ),
    security(("api_key" = []))
)]
pub async fn delete_user_by_id(
    State(state): State<AppState>,
    client: AuthenticatedClient,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    debug!(client_name = %client.client_name, id, "delete user request");

    state.user_service.delete_by_id(id).await?;
    Ok(no_content())
}

/// Helper to parse a sequential id path parameter.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError(UserdirError::validation("invalid id")))
}

/// Helper to parse a UUID path parameter.
fn parse_uuid(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError(UserdirError::validation("invalid uuid")))
}
