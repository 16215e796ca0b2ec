//! Identity Snapshot Entity
//!
//! The password-hash-free view of a verified account. This is what the
//! identity cache stores and what both login surfaces hand back to callers.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};

/// Verified identity, safe to cache and expose
#[derive(Debug, Clone, PartialEq)]
pub struct IdentitySnapshot {
    pub id: UserId,
    pub email: Email,
    pub name: Option<String>,
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub role: UserRole,
    pub created_at: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
}
