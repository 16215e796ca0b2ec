//! HTTP Handlers
//!
//! Both login surfaces delegate to the same `LoginUseCase`; these handlers
//! only translate between HTTP and the use cases.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::redirect::resolve_callback_url;

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::application::{LoginInput, LoginUseCase, SessionUseCase};
use crate::domain::repository::CredentialStore;
use crate::error::{AuthError, AuthResult};
use crate::infra::cache::IdentityCache;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, LoginUserDto, SessionResponse, SessionUserDto, SignInRequest,
    SignInResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<S>
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub cache: IdentityCache,
    pub issuer: Arc<TokenIssuer>,
    pub config: Arc<AuthConfig>,
}

impl<S> AuthAppState<S>
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    pub fn new(store: S, config: AuthConfig) -> Self {
        let config = Arc::new(config);
        Self {
            store: Arc::new(store),
            cache: IdentityCache::new(config.cache_ttl, config.cache_capacity),
            issuer: Arc::new(TokenIssuer::new(&config)),
            config,
        }
    }

    fn login_use_case(&self) -> LoginUseCase<S> {
        LoginUseCase::new(
            self.store.clone(),
            self.cache.clone(),
            self.issuer.clone(),
            self.config.clone(),
        )
    }

    fn session_use_case(&self) -> SessionUseCase<S> {
        SessionUseCase::new(self.store.clone(), self.cache.clone(), self.issuer.clone())
    }
}

// ============================================================================
// Bearer-token login
// ============================================================================

/// POST /api/auth/login
pub async fn login<S>(
    State(state): State<AuthAppState<S>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    let output = state
        .login_use_case()
        .login(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful",
        token: output.token,
        user: LoginUserDto::from(&output.user),
    }))
}

// ============================================================================
// Cookie flow
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<S>(
    State(state): State<AuthAppState<S>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    // req は以降ムーブされるので remember 等を先に退避
    let remember = req.remember;
    let callback_url = req.callback_url;

    let output = state
        .login_use_case()
        .login(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    if remember {
        // Informational only; the session TTL does not change.
        tracing::debug!(user_id = %output.user.id, "remember preference set");
    }

    let redirect_to = resolve_callback_url(callback_url.as_deref(), &state.config.base_url);
    let cookie = state.config.cookie_config().build_set_cookie(&output.token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            user: SessionUserDto::from(&output.user),
            redirect_to,
        }),
    ))
}

/// GET /api/auth/session
///
/// Signed-out callers get `authenticated: false` rather than an error; a
/// sliding refresh resets the cookie on the way out.
pub async fn session<S>(
    State(state): State<AuthAppState<S>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    // A bad or expired token reads as signed out; store faults still 500.
    let session = match token {
        Some(token) => match state.session_use_case().current(&token).await {
            Ok(session) => Some(session),
            Err(AuthError::TokenInvalid | AuthError::TokenExpired) => None,
            Err(other) => return Err(other),
        },
        None => None,
    };

    match session {
        Some(session) => {
            let mut response_headers = HeaderMap::new();
            if let Some(refreshed) = &session.refreshed_token {
                let cookie = state.config.cookie_config().build_set_cookie(refreshed);
                if let Ok(value) = cookie.parse() {
                    response_headers.insert(header::SET_COOKIE, value);
                }
            }

            Ok((
                response_headers,
                Json(SessionResponse {
                    authenticated: true,
                    user: Some(SessionUserDto::from(&session.user)),
                }),
            ))
        }
        None => Ok((
            HeaderMap::new(),
            Json(SessionResponse {
                authenticated: false,
                user: None,
            }),
        )),
    }
}

/// POST /api/auth/signout
pub async fn sign_out<S>(
    State(state): State<AuthAppState<S>>,
) -> AuthResult<impl IntoResponse>
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    // Tokens are stateless; signing out is clearing the cookie.
    let cookie = state.config.cookie_config().build_delete_cookie();

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}
