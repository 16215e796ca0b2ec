//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::identity::IdentitySnapshot;

// ============================================================================
// Bearer-token login
// ============================================================================

/// POST /login request. Fields are optional so that an omitted field and an
/// empty one map to the same "required" error instead of a parse failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /login success response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub user: LoginUserDto,
}

/// User fields echoed by the bearer route
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserDto {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
}

impl From<&IdentitySnapshot> for LoginUserDto {
    fn from(user: &IdentitySnapshot) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
        }
    }
}

// ============================================================================
// Cookie flow
// ============================================================================

/// POST /signin request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    /// "Remember me" preference; informational only
    #[serde(default)]
    pub remember: bool,
    /// Requested post-login redirect target
    pub callback_url: Option<String>,
}

/// POST /signin success response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub user: SessionUserDto,
    /// Validated redirect target (same-origin or base URL)
    pub redirect_to: String,
}

/// GET /session response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<SessionUserDto>,
}

/// The server-managed session user object
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserDto {
    pub id: String,
    pub role: String,
    pub name: Option<String>,
    pub email: String,
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<&IdentitySnapshot> for SessionUserDto {
    fn from(user: &IdentitySnapshot) -> Self {
        Self {
            id: user.id.to_string(),
            role: user.role.as_str().to_string(),
            name: user.name.clone(),
            email: user.email.as_str().to_string(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            created_at: user.created_at,
            last_login: user.last_login_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};

    #[test]
    fn test_login_response_wire_shape() {
        let snapshot = IdentitySnapshot {
            id: UserId::new(),
            email: Email::from_db("a@b.com"),
            name: Some("Reader".to_string()),
            username: None,
            avatar: None,
            role: UserRole::default(),
            created_at: None,
            last_login_at: None,
        };

        let response = LoginResponse {
            message: "Login successful",
            token: "tok".to_string(),
            user: LoginUserDto::from(&snapshot),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["message"], "Login successful");
        assert_eq!(json["token"], "tok");
        assert_eq!(json["user"]["email"], "a@b.com");
        assert_eq!(json["user"]["role"], "user");
    }

    #[test]
    fn test_login_request_tolerates_missing_fields() {
        let request: LoginRequest = serde_json::from_str(r#"{"email": "a@b.com"}"#).unwrap();
        assert_eq!(request.email.as_deref(), Some("a@b.com"));
        assert!(request.password.is_none());
    }

    #[test]
    fn test_session_user_uses_camel_case_keys() {
        let snapshot = IdentitySnapshot {
            id: UserId::new(),
            email: Email::from_db("a@b.com"),
            name: None,
            username: Some("reader42".to_string()),
            avatar: None,
            role: UserRole::default(),
            created_at: Some(Utc::now()),
            last_login_at: None,
        };

        let json = serde_json::to_value(SessionUserDto::from(&snapshot)).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("lastLogin").is_some());
        assert_eq!(json["username"], "reader42");
    }
}
