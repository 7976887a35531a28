use async_trait::async_trait;

use crate::domain::DomainError;

/// An interface for sending chat-style prompts to an LLM and receiving text responses.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. [`super::LlmExplanationProvider`] only sees prompts and text.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send a `system` instruction followed by a `user` prompt and return
    /// the assistant's response text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, DomainError>;

    /// Model identifier, for logging.
    fn model(&self) -> &str;
}
