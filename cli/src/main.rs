use std::sync::Arc;

use clap::{Parser, Subcommand};
use client::net::api::{ApiError, HttpGenerateApi};
use client::pages::image_generator::{Alerter, GenerateOutcome, ImageGenerator};
use client::pages::{IMAGE_GENERATOR_ROUTE, LOGIN_ROUTE};
use client::state::auth::{AuthState, Session};
use client::state::session::{SessionProvider, StaticSessionBackend};
use client::util::auth::{GuardOutcome, RedirectGuard};
use client::util::navigation::{MemoryNavigator, Navigator};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; pass --access-token or set IMAGEGEN_ACCESS_TOKEN")]
    NotSignedIn,
    #[error("session provider stopped before resolving the session")]
    SessionClosed,
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("generation failed: {0}")]
    Generation(String),
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Parser, Debug)]
#[command(name = "imagegen", about = "Image generation proxy CLI")]
struct Cli {
    #[arg(long, env = "IMAGEGEN_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "IMAGEGEN_ACCESS_TOKEN")]
    access_token: Option<String>,

    /// Identity attached to the session; random when omitted.
    #[arg(long)]
    user_id: Option<Uuid>,

    #[arg(long)]
    email: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that the proxy is reachable.
    Ping,
    /// Generate an image and print it as a data URL.
    Generate { prompt: String },
}

/// Prints alerts to stderr so stdout carries only the image.
struct StderrAlerter;

impl Alerter for StderrAlerter {
    fn alert(&self, title: &str, message: &str) {
        eprintln!("{title}: {message}");
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Ping => run_ping(&cli.base_url).await,
        Command::Generate { ref prompt } => run_generate(&cli, prompt).await,
    }
}

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    HttpGenerateApi::new(base_url, None)?.ping().await?;
    println!("ok");
    Ok(())
}

async fn run_generate(cli: &Cli, prompt: &str) -> Result<(), CliError> {
    let session = session_from_args(cli.access_token.as_deref(), cli.user_id, cli.email.clone());
    let provider = SessionProvider::start(Arc::new(StaticSessionBackend::new(session)));
    let auth = resolved_auth(&provider).await?;

    let mut guard = RedirectGuard::new(MemoryNavigator::new(IMAGE_GENERATOR_ROUTE));
    check_access(&mut guard, &auth)?;
    debug!(route = %guard.navigator().current_route(), "access granted");

    let token = auth.session.map(|s| s.access_token);
    let api = HttpGenerateApi::new(&cli.base_url, token)?;
    let mut page = ImageGenerator::new(api, StderrAlerter);
    page.set_prompt(prompt);

    let outcome = page.generate().await;
    provider.shutdown();
    match outcome {
        GenerateOutcome::Image(url) => {
            println!("{url}");
            Ok(())
        }
        GenerateOutcome::Rejected => Err(CliError::EmptyPrompt),
        GenerateOutcome::Failed(message) => Err(CliError::Generation(message)),
    }
}

/// Build the seeded session. A blank token means signed out.
fn session_from_args(access_token: Option<&str>, user_id: Option<Uuid>, email: Option<String>) -> Option<Session> {
    let access_token = access_token.map(str::trim).filter(|t| !t.is_empty())?;
    Some(Session { access_token: access_token.to_owned(), user_id: user_id.unwrap_or_else(Uuid::new_v4), email })
}

async fn resolved_auth(provider: &SessionProvider) -> Result<AuthState, CliError> {
    let mut rx = provider.subscribe();
    let auth = rx.wait_for(|s| !s.loading).await.map_err(|_| CliError::SessionClosed)?;
    Ok(auth.clone())
}

fn check_access<N: Navigator>(guard: &mut RedirectGuard<N>, auth: &AuthState) -> Result<(), CliError> {
    match guard.evaluate(auth) {
        GuardOutcome::Redirect(target) if target == LOGIN_ROUTE => Err(CliError::NotSignedIn),
        GuardOutcome::Blocking => Err(CliError::SessionClosed),
        GuardOutcome::Render | GuardOutcome::Redirect(_) => Ok(()),
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
