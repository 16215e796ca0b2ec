//! Login Policy
//!
//! Which account statuses are allowed to sign in, and the exact denial
//! message per status. Both login surfaces share this table, so the
//! wording cannot drift between them.

use crate::domain::value_object::account_status::AccountStatus;

pub const SUSPENDED_MESSAGE: &str =
    "This account has been suspended. Please contact support.";
pub const BLOCKED_MESSAGE: &str = "This account has been blocked. Please contact support.";
pub const BANNED_MESSAGE: &str = "This account has been banned. Please contact support.";

/// Outcome of the status gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginDecision {
    Allowed,
    Denied(&'static str),
}

/// Status → login decision table
pub struct LoginPolicy;

impl LoginPolicy {
    /// Evaluate whether an account with the given status may sign in.
    ///
    /// Unrecognized status strings are allowed, matching how the store's
    /// existing rows behave today. Flipping this to default-deny is a
    /// product decision, not a code one.
    pub fn evaluate(status: &AccountStatus) -> LoginDecision {
        match status {
            AccountStatus::Active | AccountStatus::Other(_) => LoginDecision::Allowed,
            AccountStatus::Suspended => LoginDecision::Denied(SUSPENDED_MESSAGE),
            AccountStatus::Blocked => LoginDecision::Denied(BLOCKED_MESSAGE),
            AccountStatus::Banned => LoginDecision::Denied(BANNED_MESSAGE),
        }
    }
}
