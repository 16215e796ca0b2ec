//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session token signing secret (HS256, 32 bytes)
    pub token_secret: Vec<u8>,
    /// Session token lifetime (7 days)
    pub token_ttl: Duration,
    /// Sliding-session threshold: tokens older than this are reissued on
    /// validated use (24 hours)
    pub refresh_after: Duration,
    /// Identity cache entry lifetime (5 minutes)
    pub cache_ttl: Duration,
    /// Identity cache capacity (entries)
    pub cache_capacity: usize,
    /// Deadline for one whole login call
    pub login_deadline: Duration,
    /// Session cookie name
    pub session_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Application base URL, used by the redirect guard
    pub base_url: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: vec![0u8; 32],
            token_ttl: Duration::from_secs(7 * 24 * 3600), // 7 days
            refresh_after: Duration::from_secs(24 * 3600), // 24 hours
            cache_ttl: Duration::from_secs(5 * 60),        // 5 minutes
            cache_capacity: 1024,
            login_deadline: Duration::from_secs(10),
            session_cookie_name: "portal_session".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Token TTL in whole seconds, as embedded in `exp` claims
    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl.as_secs() as i64
    }

    /// Sliding threshold in whole seconds
    pub fn refresh_after_secs(&self) -> i64 {
        self.refresh_after.as_secs() as i64
    }

    /// Session cookie configuration; Max-Age tracks the token lifetime
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.token_ttl.as_secs() as i64),
        }
    }
}
