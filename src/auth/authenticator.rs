//! The token authentication pipeline.
//!
//! One linear sequence per request: extract the bearer token, verify it,
//! resolve the user record, hand the record back. Policy about what a
//! failure *means* (reject vs. proceed anonymously) lives with the callers
//! in [`crate::auth::middleware`]; this module only classifies.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::directory::UserDirectory;
use crate::auth::verifier::{TokenVerifier, VerifyError};
use crate::db::Db;
use crate::db::schema::UserRecord;
use crate::types::UserKey;

/// Authentication configuration.
///
/// The signing secret is process-wide configuration, but it is carried here
/// as an injected value rather than read from the environment at
/// verification time, so tests can substitute a fixed secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 secret access tokens are signed with.
    pub secret: String,
    /// Clock-skew allowance for the expiry check, in seconds.
    #[serde(default)]
    pub leeway_seconds: u64,
}

impl AuthConfig {
    /// Create a config with exact expiry checking.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            leeway_seconds: 0,
        }
    }

    /// Widen the expiry check to absorb issuer clock skew.
    pub fn with_leeway(mut self, seconds: u64) -> Self {
        self.leeway_seconds = seconds;
        self
    }
}

/// Authentication errors.
///
/// This is the complete classification; nothing else escapes the pipeline.
/// `Display` renders the stable client-facing message for each class, while
/// internal detail (the `Directory` payload) stays in the variant for logs.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No bearer token was presented.
    MissingToken,
    /// A token was presented but is malformed or incorrectly signed.
    InvalidToken,
    /// The token is past its expiry.
    TokenExpired,
    /// The token is valid but names a user that does not exist.
    UnknownUser,
    /// The user directory failed; says nothing about the token or user.
    Directory(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => write!(f, "Access token is required"),
            Self::InvalidToken => write!(f, "Invalid token"),
            Self::TokenExpired => write!(f, "Token expired"),
            Self::UnknownUser => write!(f, "User not found"),
            Self::Directory(_) => write!(f, "Authentication error"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<VerifyError> for AuthError {
    fn from(err: VerifyError) -> Self {
        match err {
            VerifyError::InvalidSignature => Self::InvalidToken,
            VerifyError::Expired => Self::TokenExpired,
        }
    }
}

/// The token authenticator: verification plus directory resolution.
pub struct Authenticator {
    verifier: TokenVerifier,
    directory: UserDirectory,
}

impl Authenticator {
    /// Create a new authenticator.
    pub fn new(config: &AuthConfig, db: Db) -> Self {
        Self {
            verifier: TokenVerifier::new(&config.secret, config.leeway_seconds),
            directory: UserDirectory::new(db),
        }
    }

    /// Get reference to the user directory.
    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    /// Run the shared pipeline against an `Authorization` header value.
    ///
    /// Returns the resolved user record (password omitted) or the error
    /// class the request fell into. A header that is absent, non-UTF-8
    /// upstream, or not prefixed with the literal `"Bearer "` counts as no
    /// token at all.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<UserRecord, AuthError> {
        let token = authorization
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or(AuthError::MissingToken)?;

        let claims = self.verifier.verify(token)?;
        debug!(user_key = %claims.user_id, "access token verified");

        let user = self
            .directory
            .find_by_key(&UserKey::new(claims.user_id))
            .await
            .map_err(|err| AuthError::Directory(err.to_string()))?;

        user.ok_or(AuthError::UnknownUser)
    }
}
