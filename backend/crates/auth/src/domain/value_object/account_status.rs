//! Account Status Value Object
//!
//! The moderation state of a portal account, as stored in the `status`
//! column. The column is nullable and free-form in the source data, so
//! parsing is case-insensitive and unknown strings are carried verbatim
//! rather than rejected.

use std::fmt;

/// Account status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountStatus {
    /// Normal account; also the reading of an absent status
    Active,
    /// Suspended by a moderator
    Suspended,
    /// Blocked by a moderator
    Blocked,
    /// Permanently banned
    Banned,
    /// Unrecognized status string, preserved as stored
    Other(String),
}

impl AccountStatus {
    /// Parse the nullable `status` column. Matching is case-insensitive;
    /// `None` and empty strings read as `Active`.
    pub fn from_db(status: Option<&str>) -> Self {
        let Some(status) = status else {
            return Self::Active;
        };

        match status.trim().to_lowercase().as_str() {
            "" | "active" => Self::Active,
            "suspended" => Self::Suspended,
            "blocked" => Self::Blocked,
            "banned" => Self::Banned,
            _ => Self::Other(status.to_string()),
        }
    }

    /// Canonical string code (for logging)
    pub fn code(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Blocked => "blocked",
            Self::Banned => "banned",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
