//! Login Use Case
//!
//! The single authentication orchestration behind both the bearer-token
//! route and the cookie flow. Verification, caching and status policy are
//! defined exactly once here.
//!
//! Flow: validate input → cache lookup → (hit: issue token) or
//! (miss: verifier → cache write → issue token). The whole call runs under
//! a deadline so a wedged store cannot hold request slots open forever.

use std::sync::Arc;

use platform::password::SubmittedPassword;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::application::verify::CredentialVerifier;
use crate::domain::entity::identity::IdentitySnapshot;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};
use crate::infra::cache::IdentityCache;

/// Login input, as submitted. Both fields optional so that "field missing"
/// and "field empty" funnel into the same 400.
pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Signed session token
    pub token: String,
    /// The verified identity backing the token
    pub user: IdentitySnapshot,
}

/// Login use case
pub struct LoginUseCase<S>
where
    S: CredentialStore,
{
    verifier: CredentialVerifier<S>,
    cache: IdentityCache,
    issuer: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl<S> LoginUseCase<S>
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    pub fn new(
        store: Arc<S>,
        cache: IdentityCache,
        issuer: Arc<TokenIssuer>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            verifier: CredentialVerifier::new(store),
            cache,
            issuer,
            config,
        }
    }

    /// Authenticate a submitted email/password pair and issue a session
    /// token, under the configured deadline.
    pub async fn login(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        match tokio::time::timeout(self.config.login_deadline, self.login_inner(input)).await {
            Ok(result) => result,
            Err(_) => Err(AuthError::Timeout),
        }
    }

    async fn login_inner(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let (Some(email_raw), Some(password_raw)) = (input.email, input.password) else {
            return Err(AuthError::MissingCredentials);
        };
        if email_raw.trim().is_empty() || password_raw.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        // A malformed identifier cannot match any record; reject it with
        // the same shape as an unknown email.
        let email = Email::new(email_raw).map_err(|_| AuthError::InvalidCredentials)?;
        let password = SubmittedPassword::new(password_raw);

        let user = match self.cache.lookup(email.as_str()).await {
            Some(snapshot) => snapshot,
            None => {
                let snapshot = self.verifier.verify(&email, password).await?;
                self.cache.store(email.as_str(), snapshot.clone()).await;
                snapshot
            }
        };

        let token = self.issuer.issue(&user)?;

        tracing::info!(user_id = %user.id, "user logged in");

        Ok(LoginOutput { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::credential::CredentialRecord;
    use crate::domain::policy::SUSPENDED_MESSAGE;
    use crate::domain::value_object::{
        account_status::AccountStatus, user_id::UserId, user_role::UserRole,
    };
    use chrono::{DateTime, Utc};
    use platform::password::HashedPassword;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// In-memory store double counting projection fetches
    #[derive(Clone, Default)]
    struct MemStore {
        records: Arc<Mutex<HashMap<String, CredentialRecord>>>,
        fetches: Arc<AtomicUsize>,
        last_login_updates: Arc<AtomicUsize>,
    }

    impl MemStore {
        fn insert(&self, record: CredentialRecord) {
            self.records
                .lock()
                .unwrap()
                .insert(record.email.as_str().to_string(), record);
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl CredentialStore for MemStore {
        async fn find_by_email(&self, email: &Email) -> AuthResult<Option<CredentialRecord>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(self.records.lock().unwrap().get(email.as_str()).cloned())
        }

        async fn touch_last_login(
            &self,
            _user_id: &UserId,
            _at: DateTime<Utc>,
        ) -> AuthResult<()> {
            self.last_login_updates.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn record(email: &str, password: &str, status: AccountStatus) -> CredentialRecord {
        CredentialRecord {
            id: UserId::new(),
            email: Email::from_db(email),
            password_hash: HashedPassword::generate(&SubmittedPassword::new(
                password.to_string(),
            ))
            .unwrap(),
            name: Some("Reader".to_string()),
            username: Some("reader42".to_string()),
            avatar: None,
            role: UserRole::from_db(Some("admin".to_string())),
            status,
            created_at: Some(Utc::now()),
            last_login_at: None,
        }
    }

    fn use_case(store: &MemStore, config: AuthConfig) -> LoginUseCase<MemStore> {
        let config = Arc::new(config);
        let cache = IdentityCache::new(config.cache_ttl, config.cache_capacity);
        let issuer = Arc::new(TokenIssuer::new(&config));
        LoginUseCase::new(Arc::new(store.clone()), cache, issuer, config)
    }

    fn input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_active_account_correct_password_succeeds() {
        let store = MemStore::default();
        store.insert(record("a@b.com", "correctpw", AccountStatus::Active));
        let config = AuthConfig::with_random_secret();
        let issuer = TokenIssuer::new(&config);
        let use_case = use_case(&store, config);

        let output = use_case.login(input("a@b.com", "correctpw")).await.unwrap();

        assert_eq!(output.user.email.as_str(), "a@b.com");

        // Token claims mirror the account.
        let claims = issuer.validate(&output.token).unwrap();
        assert_eq!(claims.sub, output.user.id.to_string());
        assert_eq!(claims.email, "a@b.com");
        assert_eq!(claims.role, "admin");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
        let store = MemStore::default();
        store.insert(record("a@b.com", "correctpw", AccountStatus::Active));
        let use_case = use_case(&store, AuthConfig::with_random_secret());

        let wrong_pw = use_case
            .login(input("a@b.com", "wrongpw"))
            .await
            .unwrap_err();
        let no_record = use_case
            .login(input("ghost@x.com", "whatever1"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_pw, AuthError::InvalidCredentials));
        assert!(matches!(no_record, AuthError::InvalidCredentials));
        assert_eq!(wrong_pw.client_message(), no_record.client_message());
        assert_eq!(wrong_pw.status_code(), no_record.status_code());
    }

    #[tokio::test]
    async fn test_denied_status_rejects_even_with_correct_password() {
        let store = MemStore::default();
        store.insert(record("a@b.com", "correctpw", AccountStatus::Suspended));
        let use_case = use_case(&store, AuthConfig::with_random_secret());

        let err = use_case.login(input("a@b.com", "correctpw")).await.unwrap_err();

        match err {
            AuthError::AccountDenied { status, message } => {
                assert_eq!(status, AccountStatus::Suspended);
                assert_eq!(message, SUSPENDED_MESSAGE);
            }
            other => panic!("expected AccountDenied, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mixed_case_status_is_still_denied() {
        let store = MemStore::default();
        store.insert(record(
            "a@b.com",
            "correctpw",
            AccountStatus::from_db(Some("Suspended")),
        ));
        let use_case = use_case(&store, AuthConfig::with_random_secret());

        let err = use_case.login(input("a@b.com", "correctpw")).await.unwrap_err();
        assert!(matches!(err, AuthError::AccountDenied { .. }));
    }

    #[tokio::test]
    async fn test_missing_or_empty_credentials_are_rejected() {
        let store = MemStore::default();
        let use_case = use_case(&store, AuthConfig::with_random_secret());

        let missing_password = LoginInput {
            email: Some("a@b.com".to_string()),
            password: None,
        };
        assert!(matches!(
            use_case.login(missing_password).await.unwrap_err(),
            AuthError::MissingCredentials
        ));

        assert!(matches!(
            use_case.login(input("", "pw")).await.unwrap_err(),
            AuthError::MissingCredentials
        ));
        assert!(matches!(
            use_case.login(input("a@b.com", "")).await.unwrap_err(),
            AuthError::MissingCredentials
        ));

        // Nothing above should have touched the store.
        assert_eq!(store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_repeat_login_within_ttl_skips_the_store() {
        let store = MemStore::default();
        store.insert(record("a@b.com", "correctpw", AccountStatus::Active));
        let use_case = use_case(&store, AuthConfig::with_random_secret());

        let first = use_case.login(input("a@b.com", "correctpw")).await.unwrap();
        assert_eq!(store.fetch_count(), 1);

        let second = use_case.login(input("a@b.com", "correctpw")).await.unwrap();
        assert_eq!(store.fetch_count(), 1); // served from cache
        assert_eq!(first.user, second.user); // identical user fields
    }

    #[tokio::test]
    async fn test_login_after_ttl_expiry_refetches() {
        let store = MemStore::default();
        store.insert(record("a@b.com", "correctpw", AccountStatus::Active));
        let config = AuthConfig {
            cache_ttl: Duration::from_millis(40),
            ..AuthConfig::with_random_secret()
        };
        let use_case = use_case(&store, config);

        use_case.login(input("a@b.com", "correctpw")).await.unwrap();
        assert_eq!(store.fetch_count(), 1);

        tokio::time::sleep(Duration::from_millis(80)).await;

        use_case.login(input("a@b.com", "correctpw")).await.unwrap();
        assert_eq!(store.fetch_count(), 2);
    }

    #[tokio::test]
    async fn test_malformed_email_reads_as_invalid_credentials() {
        let store = MemStore::default();
        let use_case = use_case(&store, AuthConfig::with_random_secret());

        let err = use_case
            .login(input("not-an-email", "whatever1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
}
