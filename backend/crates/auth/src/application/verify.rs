//! Credential Verifier
//!
//! Turns one (email, password) pair into a verified identity snapshot or a
//! typed rejection: fetch the projection, gate on account status, then
//! verify the password hash.
//!
//! A missing record and a wrong password produce the same error value, and
//! the missing-record path burns a dummy Argon2 verification so its timing
//! matches the real one. The status gate intentionally runs before the
//! password check: the product shows a status-specific message whether or
//! not the password was right.

use std::sync::{Arc, LazyLock};

use chrono::Utc;
use platform::password::{HashedPassword, SubmittedPassword};

use crate::domain::entity::identity::IdentitySnapshot;
use crate::domain::policy::{LoginDecision, LoginPolicy};
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Pre-computed hash verified on the unknown-email path so response time
/// does not reveal whether the account exists.
static DUMMY_HASH: LazyLock<HashedPassword> = LazyLock::new(|| {
    HashedPassword::generate(&SubmittedPassword::new("portal-dummy-credential".to_string()))
        .unwrap_or_else(|_| {
            HashedPassword::from_phc_string(
                "$argon2id$v=19$m=19456,t=2,p=1$MDEyMzQ1Njc4OWFiY2RlZg$GpZ3sK/oH9p7bIfy/or+OM9AQsLjZ0xzVlAl2ZaF/qM",
            )
            .expect("fallback PHC literal is well-formed")
        })
});

/// Credential verification use case
pub struct CredentialVerifier<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
}

impl<S> CredentialVerifier<S>
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn verify(
        &self,
        email: &Email,
        password: SubmittedPassword,
    ) -> AuthResult<IdentitySnapshot> {
        let record = self.store.find_by_email(email).await?;

        let Some(record) = record else {
            // Same error value as a wrong password, and comparable timing.
            let _ = tokio::task::spawn_blocking(move || DUMMY_HASH.verify(&password)).await;
            tracing::warn!("login attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        if let LoginDecision::Denied(message) = LoginPolicy::evaluate(&record.status) {
            tracing::warn!(
                user_id = %record.id,
                status = %record.status,
                "login blocked by account status"
            );
            return Err(AuthError::AccountDenied {
                status: record.status,
                message,
            });
        }

        // Argon2 is CPU-bound; keep it off the async worker threads.
        let (record, password_valid) = tokio::task::spawn_blocking(move || {
            let valid = record.password_hash.verify(&password);
            (record, valid)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("password verification task failed: {e}")))?;

        if !password_valid {
            tracing::warn!(user_id = %record.id, "login attempt with incorrect password");
            return Err(AuthError::InvalidCredentials);
        }

        // Best effort, off the response path. Failure is logged, never
        // surfaced, never retried.
        let store = Arc::clone(&self.store);
        let user_id = record.id;
        let now = Utc::now();
        tokio::spawn(async move {
            if let Err(e) = store.touch_last_login(&user_id, now).await {
                tracing::warn!(error = %e, user_id = %user_id, "failed to update last login");
            }
        });

        Ok(record.into_snapshot())
    }
}
