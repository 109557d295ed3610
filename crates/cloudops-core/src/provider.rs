use async_trait::async_trait;

use crate::error::AiError;

/// A single generation request sent to a completion provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system_instruction: String,
    pub prompt: String,
    pub temperature: f32,
}

/// Sends prompts to a generative-language API and returns the generated text.
///
/// `Ok(None)` means the call succeeded but the provider produced no usable
/// text. Implementors own transport and wire-format details.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn generate(&self, request: &CompletionRequest) -> Result<Option<String>, AiError>;

    /// Human readable provider name, used in logs and the UI.
    fn name(&self) -> &'static str;
}
