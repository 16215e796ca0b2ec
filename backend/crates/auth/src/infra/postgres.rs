//! PostgreSQL Store Implementation

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::credential::CredentialRecord;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{
    account_status::AccountStatus, email::Email, user_id::UserId, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<CredentialRecord>> {
        // Explicit projection: exactly the columns one login attempt needs.
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT
                user_id,
                email,
                password_hash,
                name,
                username,
                avatar,
                role,
                status,
                created_at,
                last_login_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_record()).transpose()
    }

    async fn touch_last_login(&self, user_id: &UserId, at: DateTime<Utc>) -> AuthResult<()> {
        sqlx::query("UPDATE users SET last_login_at = $2 WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .bind(at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct CredentialRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    name: Option<String>,
    username: Option<String>,
    avatar: Option<String>,
    role: Option<String>,
    status: Option<String>,
    created_at: Option<DateTime<Utc>>,
    last_login_at: Option<DateTime<Utc>>,
}

impl CredentialRow {
    fn into_record(self) -> AuthResult<CredentialRecord> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("corrupt password hash in store: {e}")))?;

        Ok(CredentialRecord {
            id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash,
            name: self.name,
            username: self.username,
            avatar: self.avatar,
            role: UserRole::from_db(self.role),
            status: AccountStatus::from_db(self.status.as_deref()),
            created_at: self.created_at,
            last_login_at: self.last_login_at,
        })
    }
}
