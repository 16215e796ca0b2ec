//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing and verification (Argon2id, PHC strings)
//! - Cookie management
//! - Post-login redirect target validation

pub mod cookie;
pub mod password;
pub mod redirect;
