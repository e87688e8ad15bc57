//! Domain entities.

pub mod api_key;
pub mod user;

pub use api_key::ApiKey;
pub use user::User;
