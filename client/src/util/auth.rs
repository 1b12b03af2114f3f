//! Redirect guard — decides which screen a user may see.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route goes through the guard. Signed-out users only ever see the
//! login route; signed-in users never see it. While the session is still
//! resolving the guard blocks rendering and makes no routing decision.
//!
//! DESIGN
//! ======
//! The decision logic is pure (`transition`, `decide`, `step`). The stateful
//! `RedirectGuard` only adds idempotence per `(state, route)` pair and the
//! `replace_route` side effect, so it runs without a rendering environment.

use tokio::sync::watch;
use tracing::debug;

use super::navigation::{MemoryNavigator, Navigator};
use crate::pages::{HOME_ROUTE, LOGIN_ROUTE};
use crate::state::auth::AuthState;

// =============================================================================
// STATE MACHINE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Unauthenticated,
    Authenticated,
}

impl GuardState {
    #[must_use]
    pub fn from_auth(auth: &AuthState) -> Self {
        match (auth.loading, auth.is_signed_in()) {
            (true, _) => Self::Loading,
            (false, false) => Self::Unauthenticated,
            (false, true) => Self::Authenticated,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    /// The initial session check finished.
    Resolved { signed_in: bool },
    SignedIn,
    SignedOut,
    Expired,
}

/// Next guard state. While `Loading`, only `Resolved` moves the state.
#[must_use]
pub fn transition(prev: GuardState, event: AuthEvent) -> GuardState {
    match (prev, event) {
        (_, AuthEvent::Resolved { signed_in: true }) => GuardState::Authenticated,
        (_, AuthEvent::Resolved { signed_in: false }) => GuardState::Unauthenticated,
        (GuardState::Loading, _) => GuardState::Loading,
        (_, AuthEvent::SignedIn) => GuardState::Authenticated,
        (_, AuthEvent::SignedOut | AuthEvent::Expired) => GuardState::Unauthenticated,
    }
}

/// What the shell should do for `route` in `state`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Show only a progress indicator.
    Blocking,
    /// Show the route's screen.
    Render,
    /// Replace the current route with this one.
    Redirect(&'static str),
}

#[must_use]
pub fn decide(state: GuardState, route: &str) -> GuardOutcome {
    match state {
        GuardState::Loading => GuardOutcome::Blocking,
        GuardState::Unauthenticated if route != LOGIN_ROUTE => GuardOutcome::Redirect(LOGIN_ROUTE),
        GuardState::Authenticated if route == LOGIN_ROUTE => GuardOutcome::Redirect(HOME_ROUTE),
        GuardState::Unauthenticated | GuardState::Authenticated => GuardOutcome::Render,
    }
}

/// `transition` followed by `decide`.
#[must_use]
pub fn step(prev: GuardState, event: AuthEvent, route: &str) -> (GuardState, GuardOutcome) {
    let next = transition(prev, event);
    (next, decide(next, route))
}

// =============================================================================
// GUARD
// =============================================================================

pub struct RedirectGuard<N = MemoryNavigator> {
    navigator: N,
    last: Option<(GuardState, String)>,
}

impl<N: Navigator> RedirectGuard<N> {
    #[must_use]
    pub fn new(navigator: N) -> Self {
        Self { navigator, last: None }
    }

    /// Re-evaluate for the current route. Repeated calls with the same
    /// `(state, route)` pair never navigate twice.
    pub fn evaluate(&mut self, auth: &AuthState) -> GuardOutcome {
        let state = GuardState::from_auth(auth);
        let route = self.navigator.current_route();
        let outcome = decide(state, &route);

        if self.last.as_ref().is_some_and(|(s, r)| *s == state && *r == route) {
            return outcome;
        }

        if let GuardOutcome::Redirect(target) = outcome {
            if route != target {
                debug!(from = %route, to = target, ?state, "guard redirect");
                self.navigator.replace_route(target);
            }
        }
        self.last = Some((state, self.navigator.current_route()));
        outcome
    }

    /// Re-evaluate on every auth change until the provider shuts down.
    pub async fn run(&mut self, mut auth: watch::Receiver<AuthState>) {
        loop {
            let snapshot = auth.borrow_and_update().clone();
            self.evaluate(&snapshot);
            if auth.changed().await.is_err() {
                break;
            }
        }
    }

    #[must_use]
    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

impl RedirectGuard<MemoryNavigator> {
    /// User navigation to `path`, followed by a guard evaluation.
    pub fn navigate(&mut self, path: &str, auth: &AuthState) -> GuardOutcome {
        self.navigator.push(path);
        self.evaluate(auth)
    }

    /// User back navigation, followed by a guard evaluation. At the start of
    /// history the current route is re-evaluated.
    pub fn back(&mut self, auth: &AuthState) -> GuardOutcome {
        self.navigator.back();
        self.evaluate(auth)
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;
