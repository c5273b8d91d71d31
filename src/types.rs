//! NewType wrappers for strong typing across the authentication pipeline.
//!
//! These types prevent accidental mixing of semantically different strings
//! (e.g., passing a raw token where a user key is expected).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate a NewType wrapper with standard trait implementations.
macro_rules! newtype_string {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new instance.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the inner value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner String.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

newtype_string!(
    /// Key portion of a user record id, as embedded in token claims.
    ///
    /// Tokens carry this value in their `userId` claim. It identifies a row
    /// in the `user` table and is distinct from the full SurrealDB record id
    /// (`user:<key>`), which is only materialized at lookup time.
    UserKey
);

newtype_string!(
    /// SHA-256 digest of a stored user password.
    ///
    /// Passwords are never stored in plain text. The digest is computed once
    /// when a user is seeded and is excluded from every directory projection;
    /// nothing in this crate ever compares or derives from it.
    PasswordDigest
);
