use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::connector::adapter::ChatClient;
use crate::domain::DomainError;

/// Default target: LM Studio running locally on its standard port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:1234";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "ministral-3b-2512";
/// Four short sections of HTML-flavoured prose fit comfortably.
const MAX_TOKENS: u32 = 1024;

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// HTTP client for the Anthropic Messages API (and compatible endpoints such as
/// LM Studio).
///
/// **Local-first defaults**: targets LM Studio on `http://localhost:1234` without
/// an API key. Override via environment variables to target the Anthropic cloud:
///
/// ```text
/// ANTHROPIC_BASE_URL=https://api.anthropic.com
/// ANTHROPIC_API_KEY=sk-ant-...
/// ANTHROPIC_MODEL=claude-haiku-4-5
/// ```
///
/// Before each request the client sends a lightweight `HEAD /` probe with a
/// 2-second timeout, so an unreachable server fails fast instead of after the
/// 30-second request timeout.
pub struct AnthropicClient {
    client: reqwest::Client,
    probe_client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + MESSAGES_PATH).
    url: String,
    /// Base URL used for the probe (e.g. `http://localhost:1234/`).
    base_url: String,
}

impl AnthropicClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let base: String = base_url.into();
        reqwest::Url::parse(&base).map_err(|e| {
            DomainError::invalid_input(format!("AnthropicClient: invalid base URL {base:?}: {e}"))
        })?;
        let trimmed = base.trim_end_matches('/');
        let url = format!("{trimmed}{MESSAGES_PATH}");
        let base_url = format!("{trimmed}/");
        Ok(Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .map_err(build_error)?,
            probe_client: reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(2))
                .timeout(Duration::from_secs(2))
                .build()
                .map_err(build_error)?,
            api_key: api_key.into(),
            model: model.into(),
            url,
            base_url,
        })
    }

    /// Construct from environment variables with local-first defaults:
    ///
    /// | Variable             | Default                   | Purpose                   |
    /// |----------------------|---------------------------|---------------------------|
    /// | `ANTHROPIC_BASE_URL` | `http://localhost:1234`   | LM Studio / any server    |
    /// | `ANTHROPIC_MODEL`    | `ministral-3b-2512`       | Model in LM Studio        |
    /// | `ANTHROPIC_API_KEY`  | `""` (empty)              | Not required for local    |
    pub fn from_env() -> Result<Self, DomainError> {
        let base = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("ANTHROPIC_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let key = std::env::var("ANTHROPIC_API_KEY").unwrap_or_default();
        Self::new(key, model, base)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Concatenate the text of every content block.
    fn parse_text(body: &str) -> Result<String, DomainError> {
        let response: ApiResponse = serde_json::from_str(body).map_err(|e| {
            DomainError::provider(format!("AnthropicClient: failed to parse response: {e}"))
        })?;
        Ok(response
            .content
            .into_iter()
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join(""))
    }
}

#[async_trait]
impl ChatClient for AnthropicClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, DomainError> {
        // Any HTTP response, even 4xx/5xx, means the server is up
        match self.probe_client.head(&self.base_url).send().await {
            Err(e) if e.is_connect() || e.is_timeout() => {
                return Err(DomainError::provider(format!(
                    "AnthropicClient: server not reachable at {}: {e}",
                    self.base_url.trim_end_matches('/')
                )));
            }
            _ => {}
        }

        let request = ApiRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![ApiMessage {
                role: "user",
                content: user,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("AnthropicClient: request failed: {e}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            DomainError::provider(format!("AnthropicClient: failed to read response: {e}"))
        })?;

        if !status.is_success() {
            warn!("AnthropicClient: API returned {status}: {body}");
            return Err(DomainError::provider(format!(
                "AnthropicClient: API returned {status}"
            )));
        }

        Self::parse_text(&body)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn build_error(e: reqwest::Error) -> DomainError {
    DomainError::internal(format!("AnthropicClient: failed to build HTTP client: {e}"))
}
