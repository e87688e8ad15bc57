//! # Userdir REST
//!
//! Axum REST API layer: routing, controllers, API key middleware, and
//! response mapping.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use extractors::AuthenticatedClient;
pub use middleware::{api_key_auth, ApiKeyAuthState, API_KEY_HEADER};
pub use responses::{ApiResult, AppError, ErrorBody};
pub use router::create_router;
pub use state::AppState;
