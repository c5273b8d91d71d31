use serde::{Deserialize, Serialize};
use surrealdb::{RecordId, sql::Datetime};

use crate::types::PasswordDigest;

/// Persisted representation of a user in SurrealDB.
///
/// This is the projection handed to request handling after authentication.
/// The stored `password` field is intentionally absent: every directory
/// query omits it, so it can never leak through a response body or a log
/// line that serializes this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Stable database identifier for this user (table: `user`).
    pub id: RecordId,
    /// Login email address. Unique across the directory.
    pub email: String,
    /// Optional display name shown to other users.
    pub display_name: Option<String>,
    /// When this record was first created.
    pub created_at: Option<Datetime>,
    /// When this record was last updated.
    pub updated_at: Option<Datetime>,
}

/// Payload used when inserting a new user into the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    /// Login email address.
    pub email: String,
    /// Optional display name.
    pub display_name: Option<String>,
    /// Optional password digest. Stored verbatim; this crate never reads it
    /// back (credential checks belong to the issuing service).
    pub password: Option<PasswordDigest>,
}
