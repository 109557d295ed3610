//! Mentor AI advisor
//!
//! Turns a free-text incident description into troubleshooting advice. The
//! advisor never fails: provider errors are logged and replaced with a fixed
//! message so the dashboard always has something to display.

use std::sync::Arc;

use crate::ai::GeminiClient;
use crate::provider::{CompletionProvider, CompletionRequest};

pub const MODEL: &str = "gemini-3-flash-preview";
pub const TEMPERATURE: f32 = 0.7;

pub const SYSTEM_INSTRUCTION: &str = "You are a senior DevOps lead at a top global consulting firm (Deloitte style). You are professional, precise, and educational.";

pub const NO_ADVICE_MESSAGE: &str = "Sorry, I couldn't analyze the issue at this moment.";
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Error connecting to the mentor AI. Please check the logs manually.";

/// Build the user prompt for an incident description.
pub fn build_prompt(issue: &str) -> String {
    format!(
        "An incident occurred in our cloud infrastructure: \"{issue}\". \n      \
As a senior DevOps mentor, provide a concise troubleshooting guide for a junior analyst. \n      \
Include 3 actionable steps and a brief explanation of why this might happen in an enterprise setting. \n      \
Format the response in clear Markdown."
    )
}

pub fn build_request(issue: &str) -> CompletionRequest {
    CompletionRequest {
        model: MODEL.to_string(),
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        prompt: build_prompt(issue),
        temperature: TEMPERATURE,
    }
}

/// Issues advice requests against a completion provider.
///
/// Holds nothing but the provider handle, so clones are cheap and can be moved
/// into spawned tasks.
#[derive(Clone)]
pub struct AdviceCoordinator {
    provider: Arc<dyn CompletionProvider>,
}

impl AdviceCoordinator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Coordinator backed by the public Gemini endpoint.
    pub fn gemini(api_key: &str, base_url: &str) -> Self {
        Self::new(Arc::new(GeminiClient::with_base_url(api_key, base_url)))
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Ask the mentor AI about `issue`. Always resolves to a non-empty
    /// display string.
    pub async fn request_advice(&self, issue: &str) -> String {
        let request = build_request(issue);
        log::debug!(
            "Requesting advice from {} ({} chars of input)",
            self.provider.name(),
            issue.chars().count()
        );

        match self.provider.generate(&request).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                log::info!("{} returned no text for the advice request", self.provider.name());
                NO_ADVICE_MESSAGE.to_string()
            }
            Err(e) => {
                log::error!("{} error: {}", self.provider.name(), e);
                CONNECTION_ERROR_MESSAGE.to_string()
            }
        }
    }
}
