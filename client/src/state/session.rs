//! Session provider — owns the process-wide auth state.
//!
//! ARCHITECTURE
//! ============
//! `SessionProvider::start` subscribes to backend events, then spawns a task
//! that resolves the initial session and applies events in order. The state
//! is published on a `watch` channel; only the provider holds the sender.
//! Dropping the provider aborts the task and closes every receiver.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::auth::{AuthState, Session, SessionEvent};

const EVENT_CAPACITY: usize = 16;

// =============================================================================
// BACKEND
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session check failed: {0}")]
    Check(String),
    #[error("sign-out failed: {0}")]
    SignOut(String),
}

/// Auth collaborator: source of the current session and its changes.
#[async_trait::async_trait]
pub trait SessionBackend: Send + Sync {
    /// Resolve the session persisted by a previous run, if any.
    async fn current_session(&self) -> Result<Option<Session>, SessionError>;

    /// Subscribe to session changes made after this call.
    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;

    /// Invalidate the current session.
    async fn sign_out(&self) -> Result<(), SessionError>;
}

/// Backend seeded with a fixed session, e.g. an access token handed to a CLI.
pub struct StaticSessionBackend {
    session: Mutex<Option<Session>>,
    events: broadcast::Sender<SessionEvent>,
}

impl StaticSessionBackend {
    #[must_use]
    pub fn new(session: Option<Session>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { session: Mutex::new(session), events }
    }

    /// Replace the session and announce the sign-in.
    pub fn sign_in(&self, session: Session) {
        *self.lock() = Some(session.clone());
        let _ = self.events.send(SessionEvent::SignedIn(session));
    }

    /// Drop the session as if its token had been invalidated upstream.
    pub fn expire(&self) {
        *self.lock() = None;
        let _ = self.events.send(SessionEvent::Expired);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait::async_trait]
impl SessionBackend for StaticSessionBackend {
    async fn current_session(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.lock().clone())
    }

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        *self.lock() = None;
        let _ = self.events.send(SessionEvent::SignedOut);
        Ok(())
    }
}

// =============================================================================
// PROVIDER
// =============================================================================

pub struct SessionProvider {
    backend: Arc<dyn SessionBackend>,
    state: Arc<watch::Sender<AuthState>>,
    task: JoinHandle<()>,
}

impl SessionProvider {
    /// Start resolving the session. Must be called inside a Tokio runtime.
    #[must_use]
    pub fn start(backend: Arc<dyn SessionBackend>) -> Self {
        let (tx, _) = watch::channel(AuthState::default());
        let state = Arc::new(tx);
        let events = backend.subscribe();
        let task = tokio::spawn(run(backend.clone(), state.clone(), events));
        Self { backend, state, task }
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Sign out through the backend and clear the local session.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the local session is kept in that case.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        self.backend.sign_out().await?;
        self.state.send_if_modified(|state| apply_event(state, SessionEvent::SignedOut));
        Ok(())
    }

    /// Stop applying events and close all receivers.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for SessionProvider {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    backend: Arc<dyn SessionBackend>,
    state: Arc<watch::Sender<AuthState>>,
    mut events: broadcast::Receiver<SessionEvent>,
) {
    let initial = resolve(backend.as_ref()).await;
    state.send_replace(AuthState { session: initial, loading: false });

    loop {
        match events.recv().await {
            Ok(event) => {
                let changed = state.send_if_modified(|s| apply_event(s, event));
                debug!(changed, "session event applied");
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "session events lagged; re-reading session");
                let session = resolve(backend.as_ref()).await;
                state.send_if_modified(|s| replace_session(s, session));
            }
            Err(RecvError::Closed) => break,
        }
    }
}

async fn resolve(backend: &dyn SessionBackend) -> Option<Session> {
    match backend.current_session().await {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "session check failed; treating as signed out");
            None
        }
    }
}

/// Apply one event; returns whether the state changed.
pub(crate) fn apply_event(state: &mut AuthState, event: SessionEvent) -> bool {
    let next = match event {
        SessionEvent::SignedIn(session) | SessionEvent::TokenRefreshed(session) => Some(session),
        SessionEvent::SignedOut | SessionEvent::Expired => None,
    };
    replace_session(state, next)
}

fn replace_session(state: &mut AuthState, next: Option<Session>) -> bool {
    if state.session == next {
        return false;
    }
    state.session = next;
    true
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
