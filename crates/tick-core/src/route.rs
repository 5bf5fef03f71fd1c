//! Route gating decisions derived from the current auth state.
//!
//! Pure functions, re-evaluated on every call; a gate has no memory and no
//! terminal state. Hosts map the decision onto their own navigation.

use crate::session::AuthState;

/// Access decision for screens that require a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Session restore has not finished; show a wait state, never content.
    Loading,
    Authenticated,
    Unauthenticated,
}

#[must_use]
pub fn protected_route(state: &AuthState) -> GateDecision {
    if state.loading {
        GateDecision::Loading
    } else if state.user.is_some() {
        GateDecision::Authenticated
    } else {
        GateDecision::Unauthenticated
    }
}

/// Access decision for the public auth screens (login, signup).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicDecision {
    Loading,
    /// Already signed in; bounce away from the auth screens.
    RedirectHome,
    Render,
}

#[must_use]
pub fn public_route(state: &AuthState) -> PublicDecision {
    if state.loading {
        PublicDecision::Loading
    } else if state.user.is_some() {
        PublicDecision::RedirectHome
    } else {
        PublicDecision::Render
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthUser;

    fn state(loading: bool, signed_in: bool) -> AuthState {
        AuthState {
            user: signed_in.then(|| AuthUser {
                id: "user".to_string(),
                email: None,
            }),
            session: None,
            loading,
        }
    }

    #[test]
    fn protected_route_waits_while_loading() {
        assert_eq!(protected_route(&state(true, false)), GateDecision::Loading);
        // Loading wins even when a user is already present.
        assert_eq!(protected_route(&state(true, true)), GateDecision::Loading);
    }

    #[test]
    fn protected_route_admits_signed_in_users() {
        assert_eq!(
            protected_route(&state(false, true)),
            GateDecision::Authenticated
        );
        assert_eq!(
            protected_route(&state(false, false)),
            GateDecision::Unauthenticated
        );
    }

    #[test]
    fn public_route_redirects_signed_in_users() {
        assert_eq!(public_route(&state(true, false)), PublicDecision::Loading);
        assert_eq!(
            public_route(&state(false, true)),
            PublicDecision::RedirectHome
        );
        assert_eq!(public_route(&state(false, false)), PublicDecision::Render);
    }
}
