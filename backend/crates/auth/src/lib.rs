//! Auth (Authentication) Backend Module
//!
//! Credential authentication and session issuance for the library portal.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, login policy, store trait
//! - `application/` - Use cases, token issuer, configuration
//! - `infra/` - PostgreSQL store and in-process identity cache
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Email/password login behind a single use case serving both the
//!   bearer-token route and the cookie flow
//! - Signed, expiring session tokens (HS256) with a sliding 7-day window
//! - TTL+LRU-bounded identity cache short-circuiting repeat store lookups
//! - Account-status policy (suspended/blocked/banned) with per-status
//!   denial messages
//!
//! ## Security Model
//! - Passwords verified against Argon2id PHC hashes on the blocking pool
//! - Unknown email and wrong password are indistinguishable to callers,
//!   with dummy-hash timing padding on the unknown-email path
//! - Password hashes never leave the verifier; sessions and cache hold
//!   hash-free snapshots only

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::cache::IdentityCache;
pub use infra::postgres::PgCredentialStore;
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
