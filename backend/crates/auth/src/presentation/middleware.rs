//! Auth Middleware
//!
//! The identity surface for the rest of the portal: routes that need to
//! know who is calling (media dashboard, likes, comments, AI chat) sit
//! behind `require_session`, which accepts either the session cookie or a
//! bearer token and injects [`CurrentUser`] into request extensions.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub issuer: Arc<TokenIssuer>,
    pub config: Arc<AuthConfig>,
}

/// The authenticated caller, as seen by downstream handlers
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub role: String,
}

/// Middleware that requires a valid session token
pub async fn require_session(
    state: AuthMiddlewareState,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let headers = req.headers();

    // Bearer token wins over the cookie when both are present.
    let token = bearer_token(headers).or_else(|| {
        platform::cookie::extract_cookie(headers, &state.config.session_cookie_name)
    });

    let claims = match token {
        Some(token) => match state.issuer.validate(&token) {
            Ok(claims) => claims,
            Err(e) => return Err(e.into_response()),
        },
        None => {
            return Err(
                (StatusCode::UNAUTHORIZED, [("X-Auth-Required", "true")]).into_response(),
            );
        }
    };

    req.extensions_mut().insert(CurrentUser {
        id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

fn bearer_token(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::identity::IdentitySnapshot;
    use crate::domain::value_object::{email::Email, user_id::UserId, user_role::UserRole};
    use axum::extract::Extension;
    use axum::routing::get;
    use axum::{Router, middleware};
    use tower::ServiceExt;

    fn identity() -> IdentitySnapshot {
        IdentitySnapshot {
            id: UserId::new(),
            email: Email::from_db("reader@library.example"),
            name: None,
            username: None,
            avatar: None,
            role: UserRole::from_db(Some("admin".to_string())),
            created_at: None,
            last_login_at: None,
        }
    }

    fn app(state: AuthMiddlewareState) -> Router {
        async fn whoami(Extension(user): Extension<CurrentUser>) -> String {
            format!("{}:{}", user.id, user.role)
        }

        Router::new()
            .route("/whoami", get(whoami))
            .layer(middleware::from_fn(move |req, next| {
                require_session(state.clone(), req, next)
            }))
    }

    fn middleware_state() -> AuthMiddlewareState {
        let config = Arc::new(AuthConfig::development());
        AuthMiddlewareState {
            issuer: Arc::new(TokenIssuer::new(&config)),
            config,
        }
    }

    #[tokio::test]
    async fn test_bearer_token_is_accepted() {
        let state = middleware_state();
        let identity = identity();
        let token = state.issuer.issue(&identity).unwrap();

        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_session_cookie_is_accepted() {
        let state = middleware_state();
        let token = state.issuer.issue(&identity()).unwrap();
        let cookie = format!("{}={}", state.config.session_cookie_name, token);

        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let response = app(middleware_state())
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get("X-Auth-Required").unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let response = app(middleware_state())
            .oneshot(
                Request::builder()
                    .uri("/whoami")
                    .header(header::AUTHORIZATION, "Bearer garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
