//! # Userdir Repository
//!
//! SQLx/Postgres data access for the `users` and `api_keys` tables.
//!
//! Every lookup distinguishes absence (`Ok(None)`) from storage failure
//! (`Err`); callers must never conflate the two.

pub mod pool;
pub mod postgres;
pub mod traits;

pub use pool::{create_pool, DatabasePool};
pub use postgres::{PgApiKeyRepository, PgUserRepository};
pub use traits::{ApiKeyRepository, UpdateUserFields, UserRepository};
