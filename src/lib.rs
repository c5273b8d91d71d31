// Core modules
mod auth;
mod db;
mod types;
pub mod api;

// Re-export key types and functions
pub use auth::{
    AuthConfig, AuthError, Authenticator, Claims, CurrentUser, TokenVerifier, UserDirectory,
    VerifyError, hash_password, optional_auth, require_auth,
};
pub use db::{DatabaseConfig, Db, UserCreate, UserRecord, create_connection, ensure_schema};
pub use types::{PasswordDigest, UserKey};

use anyhow::Result;
use std::sync::Arc;

/// Convenience function to create a fully configured authenticator.
///
/// This connects to the database, ensures the schema exists, and returns an
/// `Authenticator` ready to be shared with the router and middleware.
pub async fn create_authenticator(
    db_config: DatabaseConfig,
    auth_config: AuthConfig,
) -> Result<Arc<Authenticator>> {
    let db = create_connection(db_config).await?;
    ensure_schema(&db).await?;

    Ok(Arc::new(Authenticator::new(&auth_config, db)))
}
