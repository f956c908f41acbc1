//! JWT token issuance and validation
//!
//! Implements JWT-based authentication with HMAC-SHA256 signing.
//! Tokens carry the username as subject and expire after a configurable
//! time-to-live. Expiry is checked with zero leeway, so a token is
//! rejected as soon as the current time passes its `exp` claim.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// JWT claims embedded in every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - username
    pub sub: String,
    /// Issued at timestamp (Unix epoch seconds)
    pub iat: u64,
    /// Expiration timestamp (Unix epoch seconds)
    pub exp: u64,
}

/// Token issuance and validation errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to encode JWT: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Invalid token format")]
    Malformed,

    #[error("System time error: {0}")]
    SystemTime(#[from] std::time::SystemTimeError),
}

/// Stateless JWT codec shared by the login flow and the identity filter
///
/// Holds the HMAC keys derived from the configured secret plus the token
/// time-to-live. Cloning is cheap enough to store one per application state.
///
/// # Example
///
/// ```no_run
/// use tms_api::auth::jwt::TokenCodec;
///
/// let codec = TokenCodec::new("secret", 3600);
/// let token = codec.issue("alice").expect("Failed to issue token");
/// let claims = codec.parse_and_verify(&token).expect("Invalid token");
/// assert_eq!(claims.sub, "alice");
/// ```
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: u64,
}

impl TokenCodec {
    /// Create a codec from a shared secret and a token lifetime in seconds
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Token lifetime in seconds
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Issue a signed token for the given subject, valid from now
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        self.issue_at(subject, now)
    }

    /// Issue a signed token with an explicit issued-at timestamp
    ///
    /// The expiration is `issued_at + ttl_secs`. Issuance is deterministic:
    /// the same subject and timestamp always produce the same token.
    pub fn issue_at(&self, subject: &str, issued_at: u64) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at + self.ttl_secs,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Encoding)
    }

    /// Validate a token's signature and expiry, returning its claims
    pub fn parse_and_verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: a token is invalid the moment its exp passes.
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })?;

        Ok(token_data.claims)
    }
}
