//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::CredentialStore;
use crate::infra::postgres::PgCredentialStore;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with the PostgreSQL store
pub fn auth_router(store: PgCredentialStore, config: AuthConfig) -> Router {
    auth_router_generic(store, config)
}

/// Create a generic Auth router for any store implementation
pub fn auth_router_generic<S>(store: S, config: AuthConfig) -> Router
where
    S: CredentialStore + Clone + Send + Sync + 'static,
{
    let state = AuthAppState::new(store, config);

    Router::new()
        .route("/login", post(handlers::login::<S>))
        .route("/signin", post(handlers::sign_in::<S>))
        .route("/session", get(handlers::session::<S>))
        .route("/signout", post(handlers::sign_out::<S>))
        .with_state(state)
}
