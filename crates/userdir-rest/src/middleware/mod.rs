//! Request middleware.

pub mod api_key;
pub mod logging;

pub use api_key::{api_key_auth, ApiKeyAuthState, API_KEY_HEADER};
pub use logging::logging_middleware;
