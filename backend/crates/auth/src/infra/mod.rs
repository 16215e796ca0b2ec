//! Infrastructure Layer
//!
//! Database implementation of the store trait and the in-process
//! identity cache.

pub mod cache;
pub mod postgres;

pub use cache::IdentityCache;
pub use postgres::PgCredentialStore;
