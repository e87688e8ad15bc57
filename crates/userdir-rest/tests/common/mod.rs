//! Shared fixtures for router-level tests: in-memory repositories wired
//! through the real service implementations.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use userdir_core::{ApiKey, User, UserdirError, UserdirResult};
use userdir_repository::{ApiKeyRepository, UpdateUserFields, UserRepository};
use userdir_rest::{create_router, AppState};
use userdir_security::hash_api_key;
use userdir_service::{ApiKeyServiceImpl, UserServiceImpl};
use uuid::Uuid;

/// Raw key provisioned in every seeded fixture.
pub const TEST_API_KEY: &str = "secret-test-key";

/// In-memory credential store that counts lookups.
pub struct InMemoryApiKeyRepository {
    records: Vec<ApiKey>,
    fail: bool,
    calls: AtomicUsize,
}

impl InMemoryApiKeyRepository {
    /// Store seeded with one record for [`TEST_API_KEY`].
    pub fn seeded(client_name: &str) -> Self {
        let now = Utc::now();
        Self {
            records: vec![ApiKey {
                id: 1,
                key_hash: hash_api_key(TEST_API_KEY),
                client_name: client_name.to_string(),
                created_at: now,
                updated_at: now,
            }],
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Store whose every lookup fails, as if storage were down.
    pub fn failing() -> Self {
        Self {
            records: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn find_by_hash(&self, hash: &str) -> UserdirResult<Option<ApiKey>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(UserdirError::Database("connection refused".to_string()));
        }
        Ok(self
            .records
            .iter()
            .find(|record| record.key_hash == hash)
            .cloned())
    }
}

/// In-memory users table with a unique-username constraint.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_all(&self) -> UserdirResult<Vec<User>> {
        Ok(self.users.lock().clone())
    }

    async fn find_by_username(&self, username: &str) -> UserdirResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> UserdirResult<Option<User>> {
        Ok(self.users.lock().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> UserdirResult<Option<User>> {
        Ok(self.users.lock().iter().find(|u| u.uuid == uuid).cloned())
    }

    async fn create(&self, username: &str, email: &str, full_name: &str) -> UserdirResult<User> {
        let mut users = self.users.lock();
        if users.iter().any(|u| u.username == username) {
            return Err(UserdirError::conflict(
                "duplicate key value violates unique constraint",
            ));
        }
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            uuid: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            full_name: full_name.to_string(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn update_by_uuid(
        &self,
        uuid: Uuid,
        fields: UpdateUserFields,
    ) -> UserdirResult<Option<User>> {
        let mut users = self.users.lock();
        let Some(user) = users.iter_mut().find(|u| u.uuid == uuid) else {
            return Ok(None);
        };
        user.username = fields.username;
        user.email = fields.email;
        user.full_name = fields.full_name;
        Ok(Some(user.clone()))
    }

    async fn update_by_id(&self, id: i64, fields: UpdateUserFields) -> UserdirResult<Option<User>> {
        let mut users = self.users.lock();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.username = fields.username;
        user.email = fields.email;
        user.full_name = fields.full_name;
        Ok(Some(user.clone()))
    }

    async fn delete_by_uuid(&self, uuid: Uuid) -> UserdirResult<bool> {
        let mut users = self.users.lock();
        let before = users.len();
        users.retain(|u| u.uuid != uuid);
        Ok(users.len() < before)
    }

    async fn delete_by_id(&self, id: i64) -> UserdirResult<bool> {
        let mut users = self.users.lock();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

/// Full application router over in-memory stores.
pub fn test_router(api_key_repo: Arc<InMemoryApiKeyRepository>) -> Router {
    let user_service = Arc::new(UserServiceImpl::new(Arc::new(InMemoryUserRepository::new())));
    let api_key_service = Arc::new(ApiKeyServiceImpl::new(
        api_key_repo,
        Duration::from_secs(60),
    ));
    let state = AppState::new(user_service, api_key_service);
    create_router(state, &userdir_config::ServerConfig::default())
}

/// Sends a request and returns the status plus the parsed JSON body, or
/// `None` for an empty body.
pub async fn send(
    router: Router,
    request: Request<Body>,
) -> (StatusCode, Option<serde_json::Value>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice(&bytes).unwrap())
    };
    (status, body)
}

/// GET request carrying the seeded API key.
pub fn authed_get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .header("X-API-Key", TEST_API_KEY)
        .body(Body::empty())
        .unwrap()
}

/// Request with a JSON body carrying the seeded API key.
pub fn authed_json(method: &str, path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("X-API-Key", TEST_API_KEY)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
