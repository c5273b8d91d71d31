//! Request authentication module.
//!
//! Validates bearer tokens on inbound HTTP requests and resolves them to
//! user records. The flow for every request is the same:
//!
//! 1. Extract the token from the `Authorization: Bearer <token>` header
//! 2. Verify the signature and expiry against the configured secret
//! 3. Look up the user record, with the password field omitted
//! 4. Attach the record to the request, or handle the failure
//!
//! Step 4 is where the two public entry points diverge: `require_auth`
//! answers failures with a stable status/message pair, `optional_auth`
//! lets the request continue anonymously.
//!
//! ## Usage
//!
//! ```ignore
//! let authenticator = Arc::new(Authenticator::new(&auth_config, db));
//!
//! let protected = Router::new()
//!     .route("/me", get(current_user))
//!     .route_layer(middleware::from_fn_with_state(
//!         authenticator.clone(),
//!         require_auth,
//!     ));
//! ```

mod authenticator;
mod directory;
mod middleware;
mod verifier;

pub use authenticator::{AuthConfig, AuthError, Authenticator};
pub use directory::{UserDirectory, hash_password};
pub use middleware::{CurrentUser, optional_auth, require_auth};
pub use verifier::{Claims, TokenVerifier, VerifyError};
