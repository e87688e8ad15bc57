//! # Userdir Service
//!
//! Business logic: user CRUD orchestration and API key validation with its
//! TTL-bounded in-memory cache.

pub mod api_key_service;
pub mod cache;
pub mod dto;
pub mod user_service;

pub use api_key_service::{ApiKeyService, ApiKeyServiceImpl};
pub use cache::ValidationCache;
pub use dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
pub use user_service::{UserService, UserServiceImpl};
