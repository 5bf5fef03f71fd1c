//! Supabase auth client for identity and session lifecycle.

use std::fmt;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{is_http_url, unix_timestamp_now};

const EXPIRY_SKEW_SECONDS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
    pub user: AuthUser,
}

impl AuthSession {
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at <= unix_timestamp_now() + EXPIRY_SKEW_SECONDS
    }
}

impl fmt::Debug for AuthSession {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("user", &self.user)
            .finish()
    }
}

/// Result of a sign-up request.
///
/// The backend withholds the session when email confirmation is pending,
/// but the identity exists either way; `user` is always present so callers
/// can complete post-signup writes such as the profile row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUp {
    pub user: AuthUser,
    pub session: Option<AuthSession>,
}

impl SignUp {
    #[must_use]
    pub const fn confirmation_required(&self) -> bool {
        self.session.is_none()
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Supabase is not configured. Set SUPABASE_URL and SUPABASE_ANON_KEY.")]
    NotConfigured,
    #[error("Invalid auth configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Api(String),
    #[error("Secure storage error: {0}")]
    SecureStorage(String),
}

pub type AuthResult<T> = Result<T, AuthError>;

/// Storage seam for the signed-in session.
///
/// Implementations must survive process restarts (keychain, encrypted file);
/// tests use an in-memory map.
pub trait SessionPersistence: Clone + Send + Sync + 'static {
    fn load_session(&self) -> AuthResult<Option<AuthSession>>;
    fn save_session(&self, session: &AuthSession) -> AuthResult<()>;
    fn clear_session(&self) -> AuthResult<()>;
}

#[derive(Clone)]
pub struct SupabaseAuthClient<S: SessionPersistence> {
    auth_url: String,
    anon_key: String,
    client: Client,
    store: S,
}

impl<S: SessionPersistence> SupabaseAuthClient<S> {
    pub fn new(url: impl AsRef<str>, anon_key: impl Into<String>, store: S) -> AuthResult<Self> {
        let auth_url = normalize_auth_url(url.as_ref())?;
        let anon_key = anon_key.into().trim().to_string();
        if anon_key.is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Supabase anon key must not be empty",
            ));
        }

        Ok(Self {
            auth_url,
            anon_key,
            client: Client::builder().build()?,
            store,
        })
    }

    /// Load the persisted session, refreshing it when expired.
    ///
    /// A failed refresh clears the stored session and reports `None` rather
    /// than an error; a stale token is indistinguishable from signed-out.
    pub async fn restore_session(&self) -> AuthResult<Option<AuthSession>> {
        let Some(stored_session) = self.store.load_session()? else {
            return Ok(None);
        };

        if !stored_session.is_expired() {
            return Ok(Some(stored_session));
        }

        match self.refresh_session(&stored_session.refresh_token).await {
            Ok(refreshed) => {
                self.store.save_session(&refreshed)?;
                Ok(Some(refreshed))
            }
            Err(error) => {
                tracing::warn!("Failed to refresh persisted session: {}", error);
                self.store.clear_session()?;
                Ok(None)
            }
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<SignUp> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({
            "email": email,
            "password": password,
        });
        let request = self.public_request(
            self.client
                .post(format!("{}/signup", self.auth_url))
                .json(&payload),
        );
        let response = self.send_auth_request(request).await?;
        let sign_up = response.into_sign_up()?;
        if let Some(session) = &sign_up.session {
            self.store.save_session(session)?;
        }
        Ok(sign_up)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<AuthSession> {
        validate_credentials(email, password)?;

        let payload = serde_json::json!({
            "email": email,
            "password": password,
        });
        let request = self.public_request(
            self.client
                .post(format!("{}/token", self.auth_url))
                .query(&[("grant_type", "password")])
                .json(&payload),
        );

        let response = self.send_auth_request(request).await?;
        let session = response.into_session()?.ok_or_else(|| {
            AuthError::Api("Sign-in response did not include an active session".to_string())
        })?;

        self.store.save_session(&session)?;
        Ok(session)
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> AuthResult<AuthSession> {
        if refresh_token.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "Refresh token must not be empty",
            ));
        }

        let payload = serde_json::json!({
            "refresh_token": refresh_token,
        });
        let request = self.public_request(
            self.client
                .post(format!("{}/token", self.auth_url))
                .query(&[("grant_type", "refresh_token")])
                .json(&payload),
        );
        let response = self.send_auth_request(request).await?;
        let session = response.into_session()?.ok_or_else(|| {
            AuthError::Api("Refresh response did not include an active session".to_string())
        })?;

        self.store.save_session(&session)?;
        Ok(session)
    }

    /// Invalidate the session server-side and clear the persisted copy.
    ///
    /// A 401 still counts as success; the token was already dead.
    pub async fn sign_out(&self, access_token: &str) -> AuthResult<()> {
        let request = self
            .client
            .post(format!("{}/logout", self.auth_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token);

        let response = request.send().await?;
        if !(response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED) {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }

        self.store.clear_session()?;
        Ok(())
    }

    fn public_request(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    async fn send_auth_request(&self, request: RequestBuilder) -> AuthResult<SupabaseAuthResponse> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Api(parse_api_error(status, &body)));
        }
        Ok(response.json::<SupabaseAuthResponse>().await?)
    }
}

pub fn normalize_auth_url(url: &str) -> AuthResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AuthError::InvalidConfiguration(
            "Supabase URL must not be empty",
        ));
    }
    if !is_http_url(trimmed) {
        return Err(AuthError::InvalidConfiguration(
            "Supabase URL must include http:// or https://",
        ));
    }
    if trimmed.ends_with("/auth/v1") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}/auth/v1"))
    }
}

fn validate_credentials(email: &str, password: &str) -> AuthResult<()> {
    if email.trim().is_empty() {
        return Err(AuthError::Api("Email is required".to_string()));
    }
    if password.trim().is_empty() {
        return Err(AuthError::Api("Password is required".to_string()));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct SupabaseAuthResponse {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<SupabaseUser>,
    session: Option<SupabaseAuthResponseSession>,
}

impl SupabaseAuthResponse {
    fn into_sign_up(self) -> AuthResult<SignUp> {
        let user = self
            .user_field()
            .ok_or_else(|| AuthError::Api("Sign-up response did not include a user".to_string()))?;
        let session = self.into_session()?;
        Ok(SignUp { user, session })
    }

    fn user_field(&self) -> Option<AuthUser> {
        self.user
            .clone()
            .or_else(|| {
                self.session
                    .as_ref()
                    .and_then(|session| session.user.clone())
            })
            .map(Into::into)
    }

    fn into_session(self) -> AuthResult<Option<AuthSession>> {
        let nested_session = self.session;
        let access_token = self.access_token.or_else(|| {
            nested_session
                .as_ref()
                .and_then(|session| session.access_token.clone())
        });
        let refresh_token = self.refresh_token.or_else(|| {
            nested_session
                .as_ref()
                .and_then(|session| session.refresh_token.clone())
        });
        let expires_at = self
            .expires_at
            .or_else(|| {
                nested_session
                    .as_ref()
                    .and_then(|session| session.expires_at)
            })
            .or_else(|| {
                self.expires_in
                    .or_else(|| {
                        nested_session
                            .as_ref()
                            .and_then(|session| session.expires_in)
                    })
                    .map(|expires_in| unix_timestamp_now().saturating_add(expires_in))
            });
        let user = self
            .user
            .or_else(|| nested_session.and_then(|session| session.user))
            .map(Into::into);

        match (access_token, refresh_token, expires_at, user) {
            (Some(access_token), Some(refresh_token), Some(expires_at), Some(user)) => {
                Ok(Some(AuthSession {
                    access_token,
                    refresh_token,
                    expires_at,
                    user,
                }))
            }
            (None, None, None, Some(_)) => Ok(None),
            _ => Err(AuthError::Api(
                "Auth response did not include enough session fields".to_string(),
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SupabaseAuthResponseSession {
    access_token: Option<String>,
    refresh_token: Option<String>,
    expires_at: Option<i64>,
    expires_in: Option<i64>,
    user: Option<SupabaseUser>,
}

#[derive(Debug, Clone, Deserialize)]
struct SupabaseUser {
    id: String,
    email: Option<String>,
}

impl From<SupabaseUser> for AuthUser {
    fn from(value: SupabaseUser) -> Self {
        Self {
            id: value.id,
            email: value.email,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SupabaseErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    msg: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<SupabaseErrorResponse>(body) {
        if let Some(message) = payload
            .message
            .or(payload.msg)
            .or(payload.error_description)
            .or(payload.error)
        {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct MapStore {
        session: Arc<Mutex<Option<AuthSession>>>,
    }

    impl SessionPersistence for MapStore {
        fn load_session(&self) -> AuthResult<Option<AuthSession>> {
            Ok(self.session.lock().unwrap().clone())
        }

        fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
            *self.session.lock().unwrap() = Some(session.clone());
            Ok(())
        }

        fn clear_session(&self) -> AuthResult<()> {
            *self.session.lock().unwrap() = None;
            Ok(())
        }
    }

    fn session_expiring_at(expires_at: i64) -> AuthSession {
        AuthSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at,
            user: AuthUser {
                id: "user-1".to_string(),
                email: Some("user@example.com".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn restore_without_a_stored_session_is_none() {
        let client =
            SupabaseAuthClient::new("https://demo.supabase.co", "anon", MapStore::default())
                .unwrap();
        assert!(client.restore_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn restore_returns_the_stored_session_while_valid() {
        let store = MapStore::default();
        store
            .save_session(&session_expiring_at(unix_timestamp_now() + 3600))
            .unwrap();
        let client = SupabaseAuthClient::new("https://demo.supabase.co", "anon", store).unwrap();

        let restored = client.restore_session().await.unwrap().unwrap();
        assert_eq!(restored.user.id, "user-1");
    }

    #[tokio::test]
    async fn restore_clears_the_store_when_the_refresh_fails() {
        let store = MapStore::default();
        store.save_session(&session_expiring_at(0)).unwrap();
        let probe = store.clone();
        // Nothing listens on this port, so the refresh attempt fails fast.
        let client = SupabaseAuthClient::new("http://127.0.0.1:1", "anon", store).unwrap();

        let restored = client.restore_session().await.unwrap();
        assert!(restored.is_none());
        assert!(probe.load_session().unwrap().is_none());
    }

    #[test]
    fn normalize_auth_url_appends_auth_path() {
        let normalized = normalize_auth_url("https://demo.supabase.co").unwrap();
        assert_eq!(normalized, "https://demo.supabase.co/auth/v1");
    }

    #[test]
    fn normalize_auth_url_keeps_existing_auth_path() {
        let normalized = normalize_auth_url("https://demo.supabase.co/auth/v1").unwrap();
        assert_eq!(normalized, "https://demo.supabase.co/auth/v1");
    }

    #[test]
    fn sign_up_without_session_fields_requires_confirmation() {
        let response = SupabaseAuthResponse {
            access_token: None,
            refresh_token: None,
            expires_at: None,
            expires_in: None,
            user: Some(SupabaseUser {
                id: "user-1".to_string(),
                email: Some("user@example.com".to_string()),
            }),
            session: None,
        };
        let sign_up = response.into_sign_up().unwrap();
        assert!(sign_up.confirmation_required());
        assert_eq!(sign_up.user.id, "user-1");
    }

    #[test]
    fn sign_up_with_session_fields_is_signed_in() {
        let response = SupabaseAuthResponse {
            access_token: Some("access".to_string()),
            refresh_token: Some("refresh".to_string()),
            expires_at: Some(1_700_000_000),
            expires_in: None,
            user: Some(SupabaseUser {
                id: "user-1".to_string(),
                email: None,
            }),
            session: None,
        };
        let sign_up = response.into_sign_up().unwrap();
        assert!(!sign_up.confirmation_required());
        let session = sign_up.session.unwrap();
        assert_eq!(session.user.id, "user-1");
        assert_eq!(session.expires_at, 1_700_000_000);
    }

    #[test]
    fn sign_up_response_without_user_is_rejected() {
        let response = SupabaseAuthResponse {
            access_token: None,
            refresh_token: None,
            expires_at: None,
            expires_in: None,
            user: None,
            session: None,
        };
        assert!(matches!(
            response.into_sign_up(),
            Err(AuthError::Api(_))
        ));
    }

    #[test]
    fn nested_session_fields_are_accepted() {
        let response = SupabaseAuthResponse {
            access_token: None,
            refresh_token: None,
            expires_at: None,
            expires_in: None,
            user: None,
            session: Some(SupabaseAuthResponseSession {
                access_token: Some("access".to_string()),
                refresh_token: Some("refresh".to_string()),
                expires_at: None,
                expires_in: Some(3600),
                user: Some(SupabaseUser {
                    id: "user-2".to_string(),
                    email: None,
                }),
            }),
        };
        let session = response.into_session().unwrap().unwrap();
        assert_eq!(session.user.id, "user-2");
        assert!(session.expires_at > unix_timestamp_now());
    }

    #[test]
    fn session_debug_redacts_tokens() {
        let session = AuthSession {
            access_token: "secret-access-token".to_string(),
            refresh_token: "secret-refresh-token".to_string(),
            expires_at: 1_700_000_000,
            user: AuthUser {
                id: "user".to_string(),
                email: None,
            },
        };
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-access-token"));
        assert!(!rendered.contains("secret-refresh-token"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn parse_api_error_prefers_backend_message() {
        let body = r#"{"msg":"Invalid login credentials"}"#;
        let rendered = parse_api_error(StatusCode::BAD_REQUEST, body);
        assert_eq!(rendered, "Invalid login credentials (400)");
    }

    #[test]
    fn parse_api_error_falls_back_to_raw_body() {
        let rendered = parse_api_error(StatusCode::BAD_GATEWAY, "upstream gone");
        assert_eq!(rendered, "upstream gone (502)");
        assert_eq!(parse_api_error(StatusCode::BAD_GATEWAY, "  "), "HTTP 502");
    }

    #[test]
    fn blank_credentials_are_rejected_before_any_request() {
        assert!(matches!(
            validate_credentials("", "password"),
            Err(AuthError::Api(_))
        ));
        assert!(matches!(
            validate_credentials("user@example.com", "   "),
            Err(AuthError::Api(_))
        ));
    }
}
