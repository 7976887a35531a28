use async_trait::async_trait;

use crate::domain::DomainError;

/// Maps a word and the passage it appears in to a natural-language explanation.
///
/// An empty string is a legitimate answer meaning "nothing this time"; callers
/// decide whether to ask again. `Err` is reserved for the provider itself
/// failing (transport, API status, unreadable payload).
#[async_trait]
pub trait ExplanationProvider: Send + Sync {
    async fn explain(&self, word: &str, context: &str) -> Result<String, DomainError>;

    /// Short identifier used in logs and the health endpoint.
    fn name(&self) -> &str;
}
