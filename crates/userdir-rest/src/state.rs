//! Application state for Axum handlers.

use std::sync::Arc;
use userdir_service::{ApiKeyService, UserService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub api_key_service: Arc<dyn ApiKeyService>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        api_key_service: Arc<dyn ApiKeyService>,
    ) -> Self {
        Self {
            user_service,
            api_key_service,
        }
    }
}
