//! User Role Value Object
//!
//! A coarse role string ("user", "admin", ...). The portal evaluates no
//! permissions beyond carrying this string in the session, so it is kept
//! as-is rather than enumerated; an absent role reads as "user".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role string carried in sessions and tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRole(String);

impl UserRole {
    /// Parse the nullable `role` column, defaulting to "user"
    pub fn from_db(role: Option<String>) -> Self {
        match role {
            Some(role) if !role.trim().is_empty() => Self(role),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self("user".to_string())
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_defaults_to_user() {
        assert_eq!(UserRole::from_db(None).as_str(), "user");
        assert_eq!(UserRole::from_db(Some("".to_string())).as_str(), "user");
        assert_eq!(UserRole::from_db(Some("  ".to_string())).as_str(), "user");
    }

    #[test]
    fn test_stored_role_preserved() {
        assert_eq!(
            UserRole::from_db(Some("admin".to_string())).as_str(),
            "admin"
        );
        assert_eq!(
            UserRole::from_db(Some("librarian".to_string())).as_str(),
            "librarian"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(UserRole::default().to_string(), "user");
    }
}
