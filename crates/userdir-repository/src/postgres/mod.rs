//! Postgres repository implementations.

pub mod api_key_repository;
pub mod user_repository;

pub use api_key_repository::PgApiKeyRepository;
pub use user_repository::PgUserRepository;
