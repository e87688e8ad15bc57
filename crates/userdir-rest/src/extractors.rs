//! Request extractors.

use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;
use userdir_core::{ApiKey, UserdirError};

/// Extractor for the API client validated by the request gate.
///
/// The gate inserts this into the request extensions on every successful
/// validation; a handler behind the gate can always extract it. Absence
/// means a route was wired without the middleware, which is a configuration
/// bug, not a caller error.
#[derive(Clone)]
pub struct AuthenticatedClient(pub Arc<ApiKey>);

impl std::ops::Deref for AuthenticatedClient {
    type Target = ApiKey;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedClient
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedClient>()
            .cloned()
            .ok_or_else(|| {
                AppError(UserdirError::internal(
                    "authenticated client missing from request extensions",
                ))
            })
    }
}
