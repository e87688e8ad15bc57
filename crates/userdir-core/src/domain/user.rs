//! User entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing one record in the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Sequential database identifier.
    pub id: i64,

    /// Stable external identifier.
    pub uuid: Uuid,

    /// Unique username.
    pub username: String,

    /// Contact email address.
    pub email: String,

    /// Display name.
    pub full_name: String,
}
