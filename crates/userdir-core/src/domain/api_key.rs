//! API key entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One authorized API caller.
///
/// Records are provisioned administratively and are read-only from the
/// validator's perspective. The raw key is never stored; only its SHA-256
/// digest lands in `key_hash`, which is unique across all records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    /// Sequential database identifier.
    pub id: i64,

    /// Lowercase hex SHA-256 digest of the raw key (never exposed via API).
    #[serde(skip_serializing, default)]
    pub key_hash: String,

    /// Human-readable owner of the key.
    pub client_name: String,

    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
