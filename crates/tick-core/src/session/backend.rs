//! Backend seam for session operations.

use crate::auth::{AuthResult, AuthSession, SessionPersistence, SignUp, SupabaseAuthClient};
use crate::config::BackendConfig;
use crate::models::NewProfile;
use crate::rest::{DataResult, TableClient};

use super::SessionError;

const PROFILE_TABLE: &str = "profile";

/// The one external collaborator of the session manager.
///
/// Production wires this to the hosted auth and table endpoints; tests
/// substitute a scripted fake.
#[allow(async_fn_in_trait)]
pub trait SessionBackend {
    async fn restore_session(&self) -> AuthResult<Option<AuthSession>>;
    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUp>;
    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession>;
    async fn sign_out(&self, access_token: &str) -> AuthResult<()>;
    async fn insert_profile(
        &self,
        session: Option<&AuthSession>,
        profile: &NewProfile,
    ) -> DataResult<()>;
}

/// `SessionBackend` over the hosted Supabase project.
#[derive(Clone)]
pub struct SupabaseSessionBackend<S: SessionPersistence> {
    auth: SupabaseAuthClient<S>,
    tables: TableClient,
}

impl<S: SessionPersistence> SupabaseSessionBackend<S> {
    pub fn new(config: &BackendConfig, store: S) -> Result<Self, SessionError> {
        Ok(Self {
            auth: SupabaseAuthClient::new(&config.url, config.anon_key.clone(), store)?,
            tables: TableClient::new(&config.url, config.anon_key.clone())?,
        })
    }
}

impl<S: SessionPersistence> SessionBackend for SupabaseSessionBackend<S> {
    async fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        self.auth.restore_session().await
    }

    async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUp> {
        self.auth.sign_up(email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        self.auth.sign_in(email, password).await
    }

    async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        self.auth.sign_out(access_token).await
    }

    /// Write the profile row with whatever credentials exist right now.
    ///
    /// Confirmation-pending sign-ups have no session yet, so the insert
    /// falls back to the anon key and relies on the backend's row policy
    /// for the profile table.
    async fn insert_profile(
        &self,
        session: Option<&AuthSession>,
        profile: &NewProfile,
    ) -> DataResult<()> {
        let access_token = session.map(|session| session.access_token.as_str());
        self.tables.insert(access_token, PROFILE_TABLE, profile).await
    }
}
