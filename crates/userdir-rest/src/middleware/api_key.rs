//! API key authentication middleware — the request gate.

use crate::extractors::AuthenticatedClient;
use crate::responses::AppError;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, error, warn};
use userdir_core::UserdirError;
use userdir_service::ApiKeyService;

/// Header carrying the API key on every protected route.
pub const API_KEY_HEADER: &str = "x-api-key";

/// State for the API key middleware.
#[derive(Clone)]
pub struct ApiKeyAuthState {
    pub api_keys: Arc<dyn ApiKeyService>,
}

impl ApiKeyAuthState {
    /// Creates the middleware state.
    pub fn new(api_keys: Arc<dyn ApiKeyService>) -> Self {
        Self { api_keys }
    }
}

/// Validates the `X-API-Key` header on every inbound request.
///
/// An absent header is treated as an empty key. On success the validated
/// record is attached to the request extensions as [`AuthenticatedClient`]
/// and the request proceeds; every failure class halts the request with its
/// own status and a stable JSON body.
pub async fn api_key_auth(
    State(state): State<ApiKeyAuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let raw_key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    match state.api_keys.validate(raw_key).await {
        Ok(client) => {
            debug!(
                method = %method,
                path = %path,
                client_name = %client.client_name,
                "api key accepted"
            );
            request
                .extensions_mut()
                .insert(AuthenticatedClient(Arc::new(client)));
            next.run(request).await
        }
        Err(err) => {
            match &err {
                UserdirError::MissingApiKey => {
                    warn!(method = %method, path = %path, "request missing api key");
                }
                UserdirError::InvalidApiKey => {
                    warn!(method = %method, path = %path, "request with invalid api key");
                }
                other => {
                    error!(
                        method = %method,
                        path = %path,
                        error = %other,
                        "failed to validate api key"
                    );
                }
            }
            AppError(err).into_response()
        }
    }
}
