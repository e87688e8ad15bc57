//! API key validation service.

use crate::cache::ValidationCache;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use userdir_config::DEFAULT_API_KEY_CACHE_TTL;
use userdir_core::{ApiKey, UserdirError, UserdirResult};
use userdir_repository::ApiKeyRepository;
use userdir_security::hash_api_key;

/// API key validation service trait.
#[async_trait]
pub trait ApiKeyService: Send + Sync {
    /// Validates a raw API key and returns the record it belongs to.
    ///
    /// Outcomes are mutually exclusive: a valid record,
    /// [`UserdirError::MissingApiKey`] for an empty key,
    /// [`UserdirError::InvalidApiKey`] for a key with no matching record,
    /// or a storage error passed through opaque.
    async fn validate(&self, raw_key: &str) -> UserdirResult<ApiKey>;
}

/// Validator over a credential store, memoized through [`ValidationCache`].
pub struct ApiKeyServiceImpl<R: ApiKeyRepository> {
    repository: Arc<R>,
    cache: ValidationCache,
    cache_ttl: Duration,
}

impl<R: ApiKeyRepository> ApiKeyServiceImpl<R> {
    /// Creates a new API key service.
    ///
    /// A zero `cache_ttl` falls back to the five-minute default.
    pub fn new(repository: Arc<R>, cache_ttl: Duration) -> Self {
        let cache_ttl = if cache_ttl.is_zero() {
            DEFAULT_API_KEY_CACHE_TTL
        } else {
            cache_ttl
        };
        Self {
            repository,
            cache: ValidationCache::new(),
            cache_ttl,
        }
    }
}

#[async_trait]
impl<R: ApiKeyRepository + 'static> ApiKeyService for ApiKeyServiceImpl<R> {
    async fn validate(&self, raw_key: &str) -> UserdirResult<ApiKey> {
        let raw_key = raw_key.trim();
        if raw_key.is_empty() {
            warn!("missing api key");
            return Err(UserdirError::MissingApiKey);
        }

        let hash = hash_api_key(raw_key);

        if let Some(key) = self.cache.get(&hash) {
            return Ok(key);
        }

        let record = self.repository.find_by_hash(&hash).await.map_err(|e| {
            error!("failed to fetch api key: {}", e);
            e
        })?;

        let Some(record) = record else {
            // Unknown keys are not cached: a key provisioned a moment from
            // now must be honored on its first retry.
            warn!("invalid api key provided");
            return Err(UserdirError::InvalidApiKey);
        };

        self.cache.put(&hash, record.clone(), self.cache_ttl);

        debug!(client_name = %record.client_name, "api key validated");
        Ok(record)
    }
}
