//! Backend endpoint configuration for client apps.
//!
//! Tick talks to exactly one hosted Supabase project, identified by a
//! project URL and a public anon key. Both values are required together;
//! everything else (auth endpoints, REST endpoints) is derived from them.

use crate::auth::{AuthError, AuthResult};
use crate::util::normalize_text_option;

/// Environment variable holding the Supabase project URL.
pub const SUPABASE_URL_ENV: &str = "SUPABASE_URL";

/// Environment variable holding the Supabase anon/public key.
pub const SUPABASE_ANON_KEY_ENV: &str = "SUPABASE_ANON_KEY";

/// Public endpoint configuration for the hosted backend.
///
/// The anon key is a publishable credential; per-user access control is
/// enforced server-side against the session token sent with each request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    /// Read the backend configuration from the process environment.
    ///
    /// Returns `Ok(None)` when neither variable is set, and
    /// `AuthError::NotConfigured` when only one of the two is present.
    pub fn from_env() -> AuthResult<Option<Self>> {
        resolve_backend_config(
            std::env::var(SUPABASE_URL_ENV).ok(),
            std::env::var(SUPABASE_ANON_KEY_ENV).ok(),
        )
    }
}

/// Resolve an optional backend configuration from raw values.
pub fn resolve_backend_config(
    url: Option<String>,
    anon_key: Option<String>,
) -> AuthResult<Option<BackendConfig>> {
    let url = normalize_text_option(url);
    let anon_key = normalize_text_option(anon_key);

    match (url, anon_key) {
        (None, None) => Ok(None),
        (Some(url), Some(anon_key)) => Ok(Some(BackendConfig { url, anon_key })),
        _ => Err(AuthError::NotConfigured),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_backend_config_requires_both_values() {
        assert!(resolve_backend_config(None, None).unwrap().is_none());
        assert!(matches!(
            resolve_backend_config(Some("https://demo.supabase.co".to_string()), None),
            Err(AuthError::NotConfigured)
        ));
        assert!(matches!(
            resolve_backend_config(None, Some("anon".to_string())),
            Err(AuthError::NotConfigured)
        ));
    }

    #[test]
    fn resolve_backend_config_trims_values() {
        let config = resolve_backend_config(
            Some(" https://demo.supabase.co ".to_string()),
            Some(" anon ".to_string()),
        )
        .unwrap()
        .unwrap();
        assert_eq!(config.url, "https://demo.supabase.co");
        assert_eq!(config.anon_key, "anon");
    }

    #[test]
    fn resolve_backend_config_treats_blank_as_missing() {
        assert!(resolve_backend_config(
            Some("   ".to_string()),
            Some("".to_string())
        )
        .unwrap()
        .is_none());
    }
}
