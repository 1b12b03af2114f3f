use uuid::Uuid;

use super::*;
use crate::pages::IMAGE_GENERATOR_ROUTE;
use crate::state::auth::Session;

const ROUTES: [&str; 4] = [HOME_ROUTE, LOGIN_ROUTE, IMAGE_GENERATOR_ROUTE, "/unknown"];

fn auth(signed_in: bool, loading: bool) -> AuthState {
    let session = signed_in.then(|| Session { access_token: "tok".into(), user_id: Uuid::nil(), email: None });
    AuthState { session, loading }
}

/// Navigator that counts replace calls.
struct CountingNavigator {
    route: String,
    replaces: Vec<String>,
}

impl CountingNavigator {
    fn at(route: &str) -> Self {
        Self { route: route.to_owned(), replaces: Vec::new() }
    }
}

impl Navigator for CountingNavigator {
    fn current_route(&self) -> String {
        self.route.clone()
    }

    fn replace_route(&mut self, path: &str) {
        self.replaces.push(path.to_owned());
        path.clone_into(&mut self.route);
    }
}

// =============================================================================
// transition
// =============================================================================

#[test]
fn loading_resolves_either_way() {
    assert_eq!(transition(GuardState::Loading, AuthEvent::Resolved { signed_in: true }), GuardState::Authenticated);
    assert_eq!(
        transition(GuardState::Loading, AuthEvent::Resolved { signed_in: false }),
        GuardState::Unauthenticated
    );
}

#[test]
fn loading_ignores_session_events() {
    for event in [AuthEvent::SignedIn, AuthEvent::SignedOut, AuthEvent::Expired] {
        assert_eq!(transition(GuardState::Loading, event), GuardState::Loading);
    }
}

#[test]
fn sign_in_and_sign_out_toggle_authentication() {
    assert_eq!(transition(GuardState::Unauthenticated, AuthEvent::SignedIn), GuardState::Authenticated);
    assert_eq!(transition(GuardState::Authenticated, AuthEvent::SignedOut), GuardState::Unauthenticated);
    assert_eq!(transition(GuardState::Authenticated, AuthEvent::Expired), GuardState::Unauthenticated);
}

#[test]
fn transition_agrees_with_from_auth() {
    assert_eq!(GuardState::from_auth(&auth(true, true)), GuardState::Loading);
    assert_eq!(GuardState::from_auth(&auth(false, false)), GuardState::Unauthenticated);
    assert_eq!(GuardState::from_auth(&auth(true, false)), GuardState::Authenticated);
}

#[test]
fn step_returns_redirect_side_effect() {
    let (state, outcome) = step(GuardState::Authenticated, AuthEvent::Expired, IMAGE_GENERATOR_ROUTE);
    assert_eq!(state, GuardState::Unauthenticated);
    assert_eq!(outcome, GuardOutcome::Redirect(LOGIN_ROUTE));

    let (state, outcome) = step(GuardState::Unauthenticated, AuthEvent::SignedIn, LOGIN_ROUTE);
    assert_eq!(state, GuardState::Authenticated);
    assert_eq!(outcome, GuardOutcome::Redirect(HOME_ROUTE));
}

// =============================================================================
// decide
// =============================================================================

#[test]
fn loading_never_redirects() {
    for route in ROUTES {
        for signed_in in [false, true] {
            let mut guard = RedirectGuard::new(CountingNavigator::at(route));
            assert_eq!(guard.evaluate(&auth(signed_in, true)), GuardOutcome::Blocking);
            assert!(guard.navigator().replaces.is_empty(), "route {route}");
        }
    }
}

#[test]
fn signed_out_off_login_redirects_to_login() {
    for route in ROUTES.into_iter().filter(|r| *r != LOGIN_ROUTE) {
        assert_eq!(decide(GuardState::Unauthenticated, route), GuardOutcome::Redirect(LOGIN_ROUTE));
    }
    assert_eq!(decide(GuardState::Unauthenticated, LOGIN_ROUTE), GuardOutcome::Render);
}

#[test]
fn signed_in_on_login_redirects_home() {
    assert_eq!(decide(GuardState::Authenticated, LOGIN_ROUTE), GuardOutcome::Redirect(HOME_ROUTE));
    for route in ROUTES.into_iter().filter(|r| *r != LOGIN_ROUTE) {
        assert_eq!(decide(GuardState::Authenticated, route), GuardOutcome::Render);
    }
}

// =============================================================================
// RedirectGuard
// =============================================================================

#[test]
fn redirect_happens_once_per_triple() {
    let mut guard = RedirectGuard::new(CountingNavigator::at(IMAGE_GENERATOR_ROUTE));
    let signed_out = auth(false, false);

    assert_eq!(guard.evaluate(&signed_out), GuardOutcome::Redirect(LOGIN_ROUTE));
    assert_eq!(guard.evaluate(&signed_out), GuardOutcome::Render);
    assert_eq!(guard.evaluate(&signed_out), GuardOutcome::Render);
    assert_eq!(guard.navigator().replaces, vec![LOGIN_ROUTE.to_owned()]);
}

#[test]
fn redundant_evaluation_of_same_triple_is_noop() {
    // Navigator that ignores replace, so the triple stays the same.
    struct Stuck;
    impl Navigator for Stuck {
        fn current_route(&self) -> String {
            IMAGE_GENERATOR_ROUTE.to_owned()
        }
        fn replace_route(&mut self, _path: &str) {
            panic!("second replace for the same triple");
        }
    }

    let mut guard = RedirectGuard::new(Stuck);
    guard.last = Some((GuardState::Unauthenticated, IMAGE_GENERATOR_ROUTE.to_owned()));
    assert_eq!(guard.evaluate(&auth(false, false)), GuardOutcome::Redirect(LOGIN_ROUTE));
}

#[test]
fn redirect_to_active_route_is_skipped() {
    struct AlreadyHome(Vec<String>);
    impl Navigator for AlreadyHome {
        fn current_route(&self) -> String {
            LOGIN_ROUTE.to_owned()
        }
        fn replace_route(&mut self, path: &str) {
            self.0.push(path.to_owned());
        }
    }

    // Login route for a signed-out user renders; nothing to replace.
    let mut guard = RedirectGuard::new(AlreadyHome(Vec::new()));
    assert_eq!(guard.evaluate(&auth(false, false)), GuardOutcome::Render);
    assert!(guard.navigator().0.is_empty());
}

#[test]
fn signed_out_redirect_replaces_history() {
    let mut nav = MemoryNavigator::new(HOME_ROUTE);
    nav.push(IMAGE_GENERATOR_ROUTE);
    let mut guard = RedirectGuard::new(nav);

    guard.evaluate(&auth(false, false));
    assert_eq!(guard.navigator().current_route(), LOGIN_ROUTE);
    assert_eq!(guard.navigator().history(), [HOME_ROUTE.to_owned(), LOGIN_ROUTE.to_owned()]);
}

#[test]
fn user_navigation_to_protected_route_is_bounced_while_signed_out() {
    let mut guard = RedirectGuard::new(MemoryNavigator::new(LOGIN_ROUTE));
    let signed_out = auth(false, false);
    assert_eq!(guard.evaluate(&signed_out), GuardOutcome::Render);

    assert_eq!(guard.navigate(IMAGE_GENERATOR_ROUTE, &signed_out), GuardOutcome::Redirect(LOGIN_ROUTE));
    assert_eq!(guard.navigator().current_route(), LOGIN_ROUTE);
}

#[test]
fn returning_to_protected_route_after_redirect_is_bounced_again() {
    let mut guard = RedirectGuard::new(MemoryNavigator::new(IMAGE_GENERATOR_ROUTE));
    let signed_out = auth(false, false);
    assert_eq!(guard.evaluate(&signed_out), GuardOutcome::Redirect(LOGIN_ROUTE));
    assert_eq!(guard.navigator().current_route(), LOGIN_ROUTE);

    assert_eq!(guard.navigate(IMAGE_GENERATOR_ROUTE, &signed_out), GuardOutcome::Redirect(LOGIN_ROUTE));
    assert_eq!(guard.navigator().current_route(), LOGIN_ROUTE);
}

#[test]
fn sign_out_then_back_then_navigate_stays_on_login() {
    let mut nav = MemoryNavigator::new(HOME_ROUTE);
    nav.push(IMAGE_GENERATOR_ROUTE);
    let mut guard = RedirectGuard::new(nav);
    let signed_in = auth(true, false);
    let signed_out = auth(false, false);
    assert_eq!(guard.evaluate(&signed_in), GuardOutcome::Render);

    assert_eq!(guard.evaluate(&signed_out), GuardOutcome::Redirect(LOGIN_ROUTE));
    assert_eq!(guard.navigator().history(), [HOME_ROUTE.to_owned(), LOGIN_ROUTE.to_owned()]);

    assert_eq!(guard.back(&signed_out), GuardOutcome::Redirect(LOGIN_ROUTE));
    assert_eq!(guard.navigator().current_route(), LOGIN_ROUTE);

    assert_eq!(guard.navigate(IMAGE_GENERATOR_ROUTE, &signed_out), GuardOutcome::Redirect(LOGIN_ROUTE));
    assert_eq!(guard.navigator().current_route(), LOGIN_ROUTE);
}

#[test]
fn sign_in_on_login_moves_home() {
    let mut guard = RedirectGuard::new(MemoryNavigator::new(LOGIN_ROUTE));
    guard.evaluate(&auth(false, false));

    assert_eq!(guard.evaluate(&auth(true, false)), GuardOutcome::Redirect(HOME_ROUTE));
    assert_eq!(guard.navigator().current_route(), HOME_ROUTE);
    assert!(!guard.navigator().can_go_back());
}

#[tokio::test]
async fn run_follows_watch_updates_until_closed() {
    let (tx, rx) = watch::channel(AuthState::default());
    let mut guard = RedirectGuard::new(MemoryNavigator::new(IMAGE_GENERATOR_ROUTE));

    let handle = tokio::spawn(async move {
        guard.run(rx).await;
        guard
    });

    tx.send_replace(auth(false, false));
    tokio::task::yield_now().await;
    drop(tx);

    let guard = handle.await.unwrap();
    assert_eq!(guard.navigator().current_route(), LOGIN_ROUTE);
}
