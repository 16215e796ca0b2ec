//! Repository Traits
//!
//! Interface to the durable credential store. Implementation is in the
//! infrastructure layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::credential::CredentialRecord;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::AuthResult;

/// Credential store trait
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Fetch the credential projection for one email, if a record exists
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<CredentialRecord>>;

    /// Best-effort update of the last successful login time
    async fn touch_last_login(&self, user_id: &UserId, at: DateTime<Utc>) -> AuthResult<()>;
}
