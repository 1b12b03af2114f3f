//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the redirect guard and user-aware screens to coordinate login
//! redirects and identity-dependent behavior.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer credential sent to the generation proxy.
    pub access_token: String,
    pub user_id: Uuid,
    /// Display only.
    pub email: Option<String>,
}

/// Authentication state tracking the current session and loading status.
///
/// While `loading` is true no routing decision is made. Once it is false the
/// state depends on `session` presence alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub loading: bool,
}

impl AuthState {
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self { session: None, loading: true }
    }
}

/// Session change notification emitted by a [`crate::state::session::SessionBackend`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    TokenRefreshed(Session),
    SignedOut,
    Expired,
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;
