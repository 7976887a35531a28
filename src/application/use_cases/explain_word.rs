use std::sync::Arc;
use std::time::Instant;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::application::ExplanationProvider;
use crate::domain::{DomainError, Explanation, ExplanationRequest, RetryPolicy};

pub struct ExplainWordUseCase {
    provider: Arc<dyn ExplanationProvider>,
    policy: RetryPolicy,
}

impl ExplainWordUseCase {
    pub fn new(provider: Arc<dyn ExplanationProvider>) -> Self {
        Self {
            provider,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn execute(&self, request: &ExplanationRequest) -> Result<Explanation, DomainError> {
        self.execute_with_cancellation(request, &CancellationToken::new())
            .await
    }

    /// Ask the provider until it answers with a non-empty explanation or the
    /// attempt bound is reached.
    ///
    /// Exhausting the bound is not an error: the last (empty) answer is
    /// returned as a successful `Explanation`. Provider errors abort the loop
    /// at once. The token is checked before every attempt and raced against
    /// the in-flight call and any retry delay.
    pub async fn execute_with_cancellation(
        &self,
        request: &ExplanationRequest,
        cancel: &CancellationToken,
    ) -> Result<Explanation, DomainError> {
        let word = request.word();
        let context = request.context();
        let max_attempts = self.policy.max_attempts();

        debug!(
            "Explaining '{}' with {} (max_attempts={})",
            word,
            self.provider.name(),
            max_attempts
        );

        let start_time = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(cancelled(word, attempts));
            }

            let text = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(word, attempts)),
                res = self.provider.explain(word, context) => res?,
            };
            attempts += 1;

            if !text.is_empty() {
                info!(
                    "Explained '{}' after {} attempt(s) in {:?}",
                    word,
                    attempts,
                    start_time.elapsed()
                );
                return Ok(Explanation::new(text, attempts));
            }

            if attempts >= max_attempts {
                warn!(
                    "Provider {} returned no explanation for '{}' in {} attempts; responding with an empty explanation",
                    self.provider.name(),
                    word,
                    attempts
                );
                return Ok(Explanation::new(text, attempts));
            }

            debug!(
                "Received empty explanation for '{}' (attempt {}/{}), trying again...",
                word, attempts, max_attempts
            );

            if self.policy.has_delay() {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Err(cancelled(word, attempts)),
                    _ = tokio::time::sleep(self.policy.retry_delay()) => {}
                }
            }
        }
    }
}

fn cancelled(word: &str, attempts: u32) -> DomainError {
    DomainError::cancelled(format!(
        "explanation of '{}' abandoned after {} attempt(s)",
        word, attempts
    ))
}
