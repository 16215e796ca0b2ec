//! Session Use Case
//!
//! Backs the cookie flow: rebuilds the server-managed session object from
//! a presented token and applies the sliding-session rule (tokens past the
//! refresh threshold are reissued with a fresh window on validated use).

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::token::{SessionClaims, TokenIssuer};
use crate::domain::entity::identity::IdentitySnapshot;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};
use crate::infra::cache::IdentityCache;

/// A validated session
#[derive(Debug)]
pub struct SessionData {
    /// The identity behind the session
    pub user: IdentitySnapshot,
    /// Claims of the presented token
    pub claims: SessionClaims,
    /// Present when the sliding rule reissued the token; the caller must
    /// reset its cookie to this value
    pub refreshed_token: Option<String>,
}

/// Session use case
pub struct SessionUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    cache: IdentityCache,
    issuer: Arc<TokenIssuer>,
}

impl<S> SessionUseCase<S>
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, cache: IdentityCache, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            store,
            cache,
            issuer,
        }
    }

    /// Validate a presented token and rebuild the session object
    pub async fn current(&self, token: &str) -> AuthResult<SessionData> {
        self.current_at(token, Utc::now()).await
    }

    /// As [`Self::current`], with an explicit clock
    pub async fn current_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<SessionData> {
        let claims = self.issuer.validate_at(token, now)?;

        let email = Email::from_db(claims.email.clone());

        // Claims only carry id/email/role; the full session object comes
        // from the cache, falling back to the store.
        let user = match self.cache.lookup(email.as_str()).await {
            Some(snapshot) => snapshot,
            None => {
                let record = self
                    .store
                    .find_by_email(&email)
                    .await?
                    // Account removed since the token was issued.
                    .ok_or(AuthError::TokenInvalid)?;
                let snapshot = record.into_snapshot();
                self.cache.store(email.as_str(), snapshot.clone()).await;
                snapshot
            }
        };

        let refreshed_token = if self.issuer.needs_refresh(&claims, now) {
            tracing::debug!(user_id = %user.id, "sliding session: reissuing token");
            Some(self.issuer.issue_at(&user, now)?)
        } else {
            None
        };

        Ok(SessionData {
            user,
            claims,
            refreshed_token,
        })
    }
}
