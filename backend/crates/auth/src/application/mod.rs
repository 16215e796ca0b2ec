//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod login;
pub mod session;
pub mod token;
pub mod verify;

// Re-exports
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use session::{SessionData, SessionUseCase};
pub use token::{SessionClaims, TokenIssuer};
pub use verify::CredentialVerifier;
