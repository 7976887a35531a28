use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::debug;

use crate::connector::api::ProviderKind;
use crate::{
    AnthropicClient, ChatClient, ExplainWordUseCase, ExplanationProvider, LlmExplanationProvider,
    OllamaClient, RetryPolicy, ScriptedExplanationProvider,
};

/// Answer served by `--mock-provider`, so the endpoint can be exercised without a model.
const MOCK_EXPLANATION: &str = "<b>Direct Explanation:</b><br/><br/>(mock provider) no model is configured.";

pub struct ContainerConfig {
    pub provider: ProviderKind,
    pub mock_provider: bool,
    pub max_attempts: u32,
    /// Pause between empty answers; zero keeps the immediate retry.
    pub retry_delay: Duration,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            mock_provider: false,
            max_attempts: crate::DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::ZERO,
        }
    }
}

/// Process-wide wiring: one provider instance shared by every request.
pub struct Container {
    provider: Arc<dyn ExplanationProvider>,
    policy: RetryPolicy,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let provider: Arc<dyn ExplanationProvider> = if config.mock_provider {
            debug!("Using mock explanation provider");
            Arc::new(ScriptedExplanationProvider::always(MOCK_EXPLANATION))
        } else {
            let client: Arc<dyn ChatClient> = match config.provider {
                ProviderKind::Anthropic => {
                    let client = AnthropicClient::from_env()?;
                    debug!("Using Anthropic-compatible chat client at {}", client.url());
                    Arc::new(client)
                }
                ProviderKind::Ollama => {
                    let client = OllamaClient::from_env()?;
                    debug!("Using Ollama chat client at {}", client.url());
                    Arc::new(client)
                }
            };
            Arc::new(LlmExplanationProvider::new(client))
        };

        let policy = RetryPolicy::new(config.max_attempts).with_retry_delay(config.retry_delay);

        Ok(Self { provider, policy })
    }

    /// Wire an already-built provider (tests, embedding).
    pub fn with_provider(provider: Arc<dyn ExplanationProvider>, policy: RetryPolicy) -> Self {
        Self { provider, policy }
    }

    pub fn explain_use_case(&self) -> ExplainWordUseCase {
        ExplainWordUseCase::new(self.provider.clone()).with_policy(self.policy)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }
}
