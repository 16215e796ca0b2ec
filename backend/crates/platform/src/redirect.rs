//! Post-login redirect target validation
//!
//! Guards the `callbackUrl` a login form may carry: only same-origin
//! targets are honored, anything else falls back to the application base
//! URL. Prevents the login endpoint from being used as an open redirector.

use url::Url;

/// Resolve a requested post-login redirect target against the base URL.
///
/// - a path starting with `/` is joined onto the base URL
/// - an absolute URL is honored only if its origin matches the base URL
/// - everything else (foreign origins, garbage, `None`) resolves to base
pub fn resolve_callback_url(requested: Option<&str>, base_url: &str) -> String {
    let Some(requested) = requested else {
        return base_url.to_string();
    };

    if requested.starts_with('/') {
        return format!("{}{}", base_url.trim_end_matches('/'), requested);
    }

    match (Url::parse(requested), Url::parse(base_url)) {
        (Ok(target), Ok(base)) if target.origin() == base.origin() => requested.to_string(),
        _ => base_url.to_string(),
    }
}
