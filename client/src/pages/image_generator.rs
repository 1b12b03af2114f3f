//! Image generator screen state: prompt in, data-URL image out.
//!
//! Failures of any kind are surfaced through a blocking [`Alerter`]; the busy
//! flag is released on every exit path, including a dropped future.

use envelope::{GenerationResponse, image_data_url, is_blank_prompt};
use tokio::sync::watch;
use tracing::error;

use crate::net::api::GenerateApi;

pub const EMPTY_PROMPT_TITLE: &str = "Error";
pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt.";
pub const GENERATION_FAILED_TITLE: &str = "Generation Failed";
pub const GENERATION_FAILED_FALLBACK: &str = "Could not generate image. Please check the logs.";

/// Blocking user-facing notification.
pub trait Alerter: Send + Sync {
    fn alert(&self, title: &str, message: &str);
}

/// Result of one `generate` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// Data URL of the generated image.
    Image(String),
    /// Blank prompt; nothing was sent.
    Rejected,
    /// The alert message shown to the user.
    Failed(String),
}

pub struct ImageGenerator<A, U> {
    api: A,
    alerts: U,
    prompt: String,
    image_url: Option<String>,
    busy: watch::Sender<bool>,
}

impl<A: GenerateApi, U: Alerter> ImageGenerator<A, U> {
    #[must_use]
    pub fn new(api: A, alerts: U) -> Self {
        let (busy, _) = watch::channel(false);
        Self { api, alerts, prompt: String::new(), image_url: None, busy }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Last generated image as a `data:image/png;base64,...` URL.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    /// Busy-flag receiver for a progress indicator.
    #[must_use]
    pub fn busy(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    /// Whether the submit control is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !is_blank_prompt(&self.prompt)
    }

    /// Submit the current prompt to the proxy.
    pub async fn generate(&mut self) -> GenerateOutcome {
        if is_blank_prompt(&self.prompt) {
            self.alerts.alert(EMPTY_PROMPT_TITLE, EMPTY_PROMPT_MESSAGE);
            return GenerateOutcome::Rejected;
        }

        let _busy = BusyGuard::acquire(&self.busy);
        self.image_url = None;

        let message = match self.api.generate_image(&self.prompt).await {
            Ok(GenerationResponse::Image { image }) => {
                let url = image_data_url(&image);
                self.image_url = Some(url.clone());
                return GenerateOutcome::Image(url);
            }
            Ok(GenerationResponse::Error { error: message }) => message,
            Err(e) => {
                error!(error = %e, "image generation request failed");
                e.to_string()
            }
        };

        let message = if message.trim().is_empty() { GENERATION_FAILED_FALLBACK.to_owned() } else { message };
        self.alerts.alert(GENERATION_FAILED_TITLE, &message);
        GenerateOutcome::Failed(message)
    }
}

/// Sets the busy flag and clears it on drop.
struct BusyGuard<'a>(&'a watch::Sender<bool>);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.send_replace(false);
    }
}

#[cfg(test)]
#[path = "image_generator_test.rs"]
mod image_generator_test;
