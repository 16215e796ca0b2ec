//! Session Token Issuer
//!
//! Signed, expiring session tokens (HS256 JWTs) carrying the subject id,
//! email and role. Signature integrity is checked before expiry so a
//! tampered token never reads as merely "expired".
//!
//! Expiry is evaluated against a caller-supplied clock, which keeps the
//! boundary conditions testable without sleeping.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::identity::IdentitySnapshot;
use crate::error::{AuthError, AuthResult};

/// Claims embedded in a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: user id
    pub sub: String,
    pub email: String,
    pub role: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds)
    pub exp: i64,
}

/// Issues and validates session tokens
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_secs: i64,
    refresh_after_secs: i64,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(&config.token_secret),
            decoding_key: DecodingKey::from_secret(&config.token_secret),
            token_ttl_secs: config.token_ttl_secs(),
            refresh_after_secs: config.refresh_after_secs(),
        }
    }

    /// Issue a token for a verified identity
    pub fn issue(&self, identity: &IdentitySnapshot) -> AuthResult<String> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue with an explicit clock
    pub fn issue_at(&self, identity: &IdentitySnapshot, now: DateTime<Utc>) -> AuthResult<String> {
        let iat = now.timestamp();
        let claims = SessionClaims {
            sub: identity.id.to_string(),
            email: identity.email.as_str().to_string(),
            role: identity.role.as_str().to_string(),
            iat,
            exp: iat + self.token_ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("token signing failed: {e}")))
    }

    /// Validate a presented token
    pub fn validate(&self, token: &str) -> AuthResult<SessionClaims> {
        self.validate_at(token, Utc::now())
    }

    /// Validate with an explicit clock.
    ///
    /// Signature first: any structural or signature failure is
    /// `TokenInvalid`. Only a well-signed token can be `TokenExpired`.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<SessionClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against the supplied clock.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|_| AuthError::TokenInvalid)?;

        if data.claims.exp <= now.timestamp() {
            return Err(AuthError::TokenExpired);
        }

        Ok(data.claims)
    }

    /// Sliding-session rule: a validated token older than the refresh
    /// threshold gets reissued with a fresh window on next use.
    pub fn needs_refresh(&self, claims: &SessionClaims, now: DateTime<Utc>) -> bool {
        now.timestamp() - claims.iat >= self.refresh_after_secs
    }
}
