//! CLI session wiring: keychain persistence and session manager construction.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(not(test))]
use keyring::Entry;

use tick_core::auth::{AuthError, AuthResult, AuthSession, SessionPersistence};
use tick_core::config::BackendConfig;
use tick_core::session::{SessionManager, SupabaseSessionBackend};

use crate::error::CliError;

#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "tick-cli";

const SESSION_USERNAME: &str = "supabase_session";

/// Keychain-backed `SessionPersistence`; tests use a shared in-memory map.
#[derive(Clone)]
pub struct SessionStore {
    username: String,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            username: SESSION_USERNAME.to_string(),
        }
    }

    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(&self) -> AuthResult<Entry> {
        Entry::new(KEYRING_SERVICE_NAME, &self.username)
            .map_err(|error| AuthError::SecureStorage(error.to_string()))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionPersistence for SessionStore {
    #[cfg(not(test))]
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let entry = self.entry()?;
        match entry.get_password() {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(AuthError::SecureStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let store = Self::test_store();
        let guard = store
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        if let Some(raw) = guard.get(&self.username) {
            Ok(Some(serde_json::from_str(raw)?))
        } else {
            Ok(None)
        }
    }

    #[cfg(not(test))]
    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let raw = serde_json::to_string(session)?;
        self.entry()?
            .set_password(&raw)
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        Ok(())
    }

    #[cfg(test)]
    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let raw = serde_json::to_string(session)?;
        let store = Self::test_store();
        let mut guard = store
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        guard.insert(self.username.clone(), raw);
        Ok(())
    }

    #[cfg(not(test))]
    fn clear_session(&self) -> AuthResult<()> {
        let entry = self.entry()?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(AuthError::SecureStorage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn clear_session(&self) -> AuthResult<()> {
        let store = Self::test_store();
        let mut guard = store
            .lock()
            .map_err(|error| AuthError::SecureStorage(error.to_string()))?;
        guard.remove(&self.username);
        Ok(())
    }
}

pub type CliSessionManager = SessionManager<SupabaseSessionBackend<SessionStore>>;

/// Read the backend configuration, treating an unconfigured environment as
/// an error; every caller is about to talk to the backend.
pub fn backend_config() -> Result<BackendConfig, CliError> {
    Ok(BackendConfig::from_env()?.ok_or(AuthError::NotConfigured)?)
}

pub fn session_manager(config: &BackendConfig) -> Result<CliSessionManager, CliError> {
    let backend = SupabaseSessionBackend::new(config, SessionStore::new())?;
    Ok(SessionManager::new(backend))
}

#[cfg(test)]
mod tests {
    use tick_core::auth::AuthUser;

    use super::*;

    fn session() -> AuthSession {
        AuthSession {
            access_token: "access-token".to_string(),
            refresh_token: "refresh-token".to_string(),
            expires_at: 4_000_000_000,
            user: AuthUser {
                id: "user-1".to_string(),
                email: Some("user@example.com".to_string()),
            },
        }
    }

    #[test]
    fn session_store_roundtrips_saved_sessions() {
        let store = SessionStore {
            username: "roundtrip-test".to_string(),
        };

        assert!(store.load_session().unwrap().is_none());

        store.save_session(&session()).unwrap();
        let loaded = store.load_session().unwrap().unwrap();
        assert_eq!(loaded.access_token, "access-token");
        assert_eq!(loaded.user.id, "user-1");

        store.clear_session().unwrap();
        assert!(store.load_session().unwrap().is_none());
    }

    #[test]
    fn cleared_store_stays_empty_when_cleared_again() {
        let store = SessionStore {
            username: "double-clear-test".to_string(),
        };
        store.clear_session().unwrap();
        store.clear_session().unwrap();
        assert!(store.load_session().unwrap().is_none());
    }
}
