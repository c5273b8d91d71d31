//! Bearer token verification against the configured signing secret.

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};

/// Claims carried by an access token.
///
/// Only the fields the authentication pipeline consumes are modeled. Claims
/// are transient: they are decoded, used for the directory lookup, and
/// dropped — never persisted or attached to the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Key of the user record this token was issued for.
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Expiration time as seconds since the Unix epoch.
    pub exp: u64,
}

/// Closed set of verification failures.
///
/// Everything that is not an expiry is reported as `InvalidSignature`:
/// malformed tokens, tampered payloads, wrong algorithms, and missing
/// required claims all mean the token cannot be trusted, and callers must
/// not be able to distinguish further.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The token is malformed or its signature does not match.
    InvalidSignature,
    /// The token was well-formed and correctly signed, but its expiry has passed.
    Expired,
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSignature => write!(f, "invalid token signature"),
            Self::Expired => write!(f, "token expired"),
        }
    }
}

impl std::error::Error for VerifyError {}

/// Verifies HS256-signed access tokens against a shared secret.
///
/// The secret is injected at construction so tests can substitute a fixed
/// value; nothing here reads ambient process state.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for the given secret.
    ///
    /// `leeway_seconds` widens the expiry check to absorb clock skew between
    /// the issuer and this service. Zero means expiry is exact.
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_seconds;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, VerifyError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => VerifyError::Expired,
                _ => VerifyError::InvalidSignature,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &str = "test-signing-secret";

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> u64 {
        chrono::Utc::now().timestamp() as u64 + 3600
    }

    #[test]
    fn test_verify_round_trip() {
        let verifier = TokenVerifier::new(SECRET, 0);
        let token = sign(
            &Claims {
                user_id: "u1".to_string(),
                exp: future_exp(),
            },
            SECRET,
        );

        let claims = verifier.verify(&token).unwrap();
        assert_eq!(claims.user_id, "u1");
    }

    #[test]
    fn test_verify_wrong_secret() {
        let verifier = TokenVerifier::new(SECRET, 0);
        let token = sign(
            &Claims {
                user_id: "u1".to_string(),
                exp: future_exp(),
            },
            "some-other-secret",
        );

        assert_eq!(
            verifier.verify(&token).unwrap_err(),
            VerifyError::InvalidSignature
        );
    }

    #[test]
    fn test_verify_garbage_token() {
        let verifier = TokenVerifier::new(SECRET, 0);
        assert_eq!(
            verifier.verify("not-a-token").unwrap_err(),
            VerifyError::InvalidSignature
        );
    }

    #[test]
    fn test_verify_expired() {
        let verifier = TokenVerifier::new(SECRET, 0);
        let token = sign(
            &Claims {
                user_id: "u1".to_string(),
                exp: chrono::Utc::now().timestamp() as u64 - 3600,
            },
            SECRET,
        );

        assert_eq!(verifier.verify(&token).unwrap_err(), VerifyError::Expired);
    }

    #[test]
    fn test_verify_leeway_absorbs_recent_expiry() {
        let verifier = TokenVerifier::new(SECRET, 120);
        let token = sign(
            &Claims {
                user_id: "u1".to_string(),
                exp: chrono::Utc::now().timestamp() as u64 - 30,
            },
            SECRET,
        );

        assert!(verifier.verify(&token).is_ok());
    }

    #[test]
    fn test_verify_missing_exp_claim() {
        #[derive(Serialize)]
        struct BareClaims {
            #[serde(rename = "userId")]
            user_id: String,
        }

        let token = encode(
            &Header::default(),
            &BareClaims {
                user_id: "u1".to_string(),
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let verifier = TokenVerifier::new(SECRET, 0);
        assert_eq!(
            verifier.verify(&token).unwrap_err(),
            VerifyError::InvalidSignature
        );
    }

    #[test]
    fn test_verify_missing_user_id_claim() {
        #[derive(Serialize)]
        struct SubjectClaims {
            sub: String,
            exp: u64,
        }

        let token = encode(
            &Header::default(),
            &SubjectClaims {
                sub: "u1".to_string(),
                exp: future_exp(),
            },
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let verifier = TokenVerifier::new(SECRET, 0);
        assert_eq!(
            verifier.verify(&token).unwrap_err(),
            VerifyError::InvalidSignature
        );
    }
}
