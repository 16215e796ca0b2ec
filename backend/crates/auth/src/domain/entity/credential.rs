//! Credential Record Entity
//!
//! The projection of a user row that credential verification needs.
//! This is the only type in the crate that holds the password hash; it is
//! consumed by [`CredentialRecord::into_snapshot`] before anything leaves
//! the verifier, so the hash cannot reach the cache, a session, or a
//! response body.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::entity::identity::IdentitySnapshot;
use crate::domain::value_object::{
    account_status::AccountStatus, email::Email, user_id::UserId, user_role::UserRole,
};

/// Credential projection fetched from the store for one login attempt
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub id: UserId,
    pub email: Email,
    /// Argon2id PHC hash; never copied into snapshots
    pub password_hash: HashedPassword,
    pub name: Option<String>,
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub role: UserRole,
    pub status: AccountStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl CredentialRecord {
    /// Strip the password hash, producing the view that is safe to cache
    /// and return to callers. Consumes the record so the hash is dropped.
    pub fn into_snapshot(self) -> IdentitySnapshot {
        IdentitySnapshot {
            id: self.id,
            email: self.email,
            name: self.name,
            username: self.username,
            avatar: self.avatar,
            role: self.role,
            created_at: self.created_at,
            last_login_at: self.last_login_at,
        }
    }
}
