//! Session lifecycle: restore-on-startup, sign-up/in/out, and state change
//! notifications.
//!
//! `SessionManager` owns the authoritative `AuthState`. Every state write
//! goes through one internal apply path, which then notifies subscribers
//! synchronously on the dispatching task; operations themselves never touch
//! the state fields. Subscribers receive each state change at most once and
//! hold a cancellation handle that deregisters on `cancel()` or drop.

mod backend;

pub use backend::{SessionBackend, SupabaseSessionBackend};

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use thiserror::Error;

use crate::auth::{AuthError, AuthSession, AuthUser, SignUp};
use crate::models::NewProfile;
use crate::rest::DataError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Data(#[from] DataError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Snapshot of the client's authentication state.
///
/// `loading` is true only between construction and the completion of
/// `initialize`; it clears whether or not a session could be restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub session: Option<AuthSession>,
    pub loading: bool,
}

impl AuthState {
    const fn initial() -> Self {
        Self {
            user: None,
            session: None,
            loading: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEventKind {
    /// Restore finished; carries the persisted session when one survived.
    InitialSession,
    SignedIn,
    SignedOut,
}

/// A state change delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthEvent {
    pub kind: AuthEventKind,
    pub session: Option<AuthSession>,
}

type Observer = Arc<dyn Fn(&AuthEvent) + Send + Sync + 'static>;

struct SessionShared {
    state: Mutex<AuthState>,
    observers: Mutex<HashMap<u64, Observer>>,
    next_observer_id: AtomicU64,
}

/// Handle returned by `SessionManager::subscribe`.
///
/// Deregisters the observer on `cancel()` or on drop, whichever comes
/// first; the second teardown path is a no-op.
pub struct AuthSubscription {
    shared: Weak<SessionShared>,
    id: u64,
    cancelled: AtomicBool,
}

impl AuthSubscription {
    pub fn cancel(&self) {
        self.deregister();
    }

    fn deregister(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(shared) = self.shared.upgrade() {
            lock_unpoisoned(&shared.observers).remove(&self.id);
        }
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        self.deregister();
    }
}

/// Owns the auth state and drives the session lifecycle against a backend.
pub struct SessionManager<B: SessionBackend> {
    backend: B,
    shared: Arc<SessionShared>,
}

impl<B: SessionBackend + Clone> Clone for SessionManager<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<B: SessionBackend> SessionManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            shared: Arc::new(SessionShared {
                state: Mutex::new(AuthState::initial()),
                observers: Mutex::new(HashMap::new()),
                next_observer_id: AtomicU64::new(0),
            }),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.lock_state().clone()
    }

    /// Register an observer for auth state changes.
    pub fn subscribe<F>(&self, observer: F) -> AuthSubscription
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        let id = self.shared.next_observer_id.fetch_add(1, Ordering::Relaxed);
        lock_unpoisoned(&self.shared.observers).insert(id, Arc::new(observer));
        AuthSubscription {
            shared: Arc::downgrade(&self.shared),
            id,
            cancelled: AtomicBool::new(false),
        }
    }

    /// Restore the persisted session once at startup.
    ///
    /// Restore failures are logged and swallowed; the app starts signed out
    /// rather than broken. `loading` clears on every path.
    pub async fn initialize(&self) {
        let session = match self.backend.restore_session().await {
            Ok(session) => session,
            Err(error) => {
                tracing::error!("Failed to restore persisted session: {error}");
                None
            }
        };
        self.apply(AuthEventKind::InitialSession, session);
    }

    /// Create an identity, then its profile row.
    ///
    /// An identity failure returns before anything is written. A profile
    /// failure is returned to the caller while the identity (and any
    /// session the backend opened) remains; there is no rollback.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> SessionResult<SignUp> {
        let sign_up = self.backend.sign_up(email, password).await?;

        if let Some(session) = &sign_up.session {
            self.apply(AuthEventKind::SignedIn, Some(session.clone()));
        }

        let profile = NewProfile {
            user_id: sign_up.user.id.clone(),
            email: email.trim().to_string(),
            full_name: display_name.trim().to_string(),
        };
        if let Err(error) = self
            .backend
            .insert_profile(sign_up.session.as_ref(), &profile)
            .await
        {
            tracing::warn!(
                "Profile row was not created for new identity {}: {error}",
                sign_up.user.id
            );
            return Err(error.into());
        }

        Ok(sign_up)
    }

    /// Exchange credentials for a session.
    ///
    /// The operation itself writes no state; the resulting session lands in
    /// `AuthState` through the apply path like every other change.
    pub async fn sign_in(&self, email: &str, password: &str) -> SessionResult<()> {
        let session = self.backend.sign_in(email, password).await?;
        self.apply(AuthEventKind::SignedIn, Some(session));
        Ok(())
    }

    /// Invalidate the current session and clear local state.
    pub async fn sign_out(&self) -> SessionResult<()> {
        if let Some(session) = self.state().session {
            self.backend.sign_out(&session.access_token).await?;
        }
        self.apply(AuthEventKind::SignedOut, None);
        Ok(())
    }

    /// The single state writer. Replaces user and session together under
    /// one lock, then notifies with the lock released.
    fn apply(&self, kind: AuthEventKind, session: Option<AuthSession>) {
        let event = AuthEvent { kind, session };
        {
            let mut state = self.lock_state();
            if event.kind == AuthEventKind::InitialSession {
                state.loading = false;
            }
            state.user = event.session.as_ref().map(|session| session.user.clone());
            state.session = event.session.clone();
        }
        self.notify(&event);
    }

    fn notify(&self, event: &AuthEvent) {
        let observers = lock_unpoisoned(&self.shared.observers)
            .values()
            .cloned()
            .collect::<Vec<_>>();
        for observer in observers {
            observer(event);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, AuthState> {
        lock_unpoisoned(&self.shared.state)
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
