use clap::CommandFactory;

use super::*;

#[test]
fn cli_definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn generate_takes_positional_prompt() {
    let cli = Cli::try_parse_from(["imagegen", "--access-token", "tok", "generate", "a red fox"]).unwrap();
    assert_eq!(cli.access_token.as_deref(), Some("tok"));
    assert!(matches!(cli.command, Command::Generate { ref prompt } if prompt == "a red fox"));
}

#[test]
fn blank_token_means_no_session() {
    assert!(session_from_args(None, None, None).is_none());
    assert!(session_from_args(Some("  "), None, None).is_none());
}

#[test]
fn session_keeps_given_identity() {
    let id = Uuid::new_v4();
    let session = session_from_args(Some("tok"), Some(id), Some("a@b.c".into())).unwrap();
    assert_eq!(session.access_token, "tok");
    assert_eq!(session.user_id, id);
    assert_eq!(session.email.as_deref(), Some("a@b.c"));
}

#[tokio::test]
async fn signed_out_is_rejected() {
    let provider = SessionProvider::start(Arc::new(StaticSessionBackend::new(None)));
    let auth = resolved_auth(&provider).await.unwrap();
    let mut guard = RedirectGuard::new(MemoryNavigator::new(IMAGE_GENERATOR_ROUTE));

    assert!(matches!(check_access(&mut guard, &auth), Err(CliError::NotSignedIn)));
    assert_eq!(guard.navigator().current_route(), LOGIN_ROUTE);
}

#[tokio::test]
async fn signed_in_stays_on_generator() {
    let session = session_from_args(Some("tok"), None, None);
    let provider = SessionProvider::start(Arc::new(StaticSessionBackend::new(session)));
    let auth = resolved_auth(&provider).await.unwrap();
    let mut guard = RedirectGuard::new(MemoryNavigator::new(IMAGE_GENERATOR_ROUTE));

    assert!(check_access(&mut guard, &auth).is_ok());
    assert_eq!(guard.navigator().current_route(), IMAGE_GENERATOR_ROUTE);
}
