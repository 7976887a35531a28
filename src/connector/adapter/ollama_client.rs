use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::connector::adapter::ChatClient;
use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const GENERATE_PATH: &str = "/api/generate";
const DEFAULT_MODEL: &str = "llama3";

#[derive(serde::Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
    /// Constrains the model to emit a JSON document.
    format: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Client for a local Ollama server's non-streaming `/api/generate` endpoint.
///
/// | Variable          | Default                  |
/// |-------------------|--------------------------|
/// | `OLLAMA_BASE_URL` | `http://localhost:11434` |
/// | `OLLAMA_MODEL`    | `llama3`                 |
pub struct OllamaClient {
    client: reqwest::Client,
    model: String,
    url: String,
}

impl OllamaClient {
    pub fn new(model: impl Into<String>, base_url: impl Into<String>) -> Result<Self, DomainError> {
        let base: String = base_url.into();
        reqwest::Url::parse(&base).map_err(|e| {
            DomainError::invalid_input(format!("OllamaClient: invalid base URL {base:?}: {e}"))
        })?;
        let url = format!("{}{}", base.trim_end_matches('/'), GENERATE_PATH);
        // Local models can be slow to load on first use
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| {
                DomainError::internal(format!("OllamaClient: failed to build HTTP client: {e}"))
            })?;
        Ok(Self {
            client,
            model: model.into(),
            url,
        })
    }

    pub fn from_env() -> Result<Self, DomainError> {
        let base =
            std::env::var("OLLAMA_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(model, base)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn parse_text(body: &str) -> Result<String, DomainError> {
        let response: GenerateResponse = serde_json::from_str(body).map_err(|e| {
            DomainError::provider(format!("OllamaClient: failed to parse response: {e}"))
        })?;
        Ok(response.response)
    }
}

#[async_trait]
impl ChatClient for OllamaClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, DomainError> {
        let request = GenerateRequest {
            model: &self.model,
            system,
            prompt: user,
            stream: false,
            format: "json",
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::provider(format!("OllamaClient: request failed: {e}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            DomainError::provider(format!("OllamaClient: failed to read response: {e}"))
        })?;

        if !status.is_success() {
            warn!("OllamaClient: API returned {status}: {body}");
            return Err(DomainError::provider(format!(
                "OllamaClient: API returned {status}"
            )));
        }

        Self::parse_text(&body)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_points_at_generate_endpoint() {
        let client = OllamaClient::new("llama3", "http://localhost:11434/").unwrap();
        assert_eq!(client.url(), "http://localhost:11434/api/generate");
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let err = OllamaClient::new("llama3", "localhost 11434").err().unwrap();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn parse_text_reads_response_field() {
        let body = r#"{"model": "llama3", "response": "{\"mnemonic\": \"fawn\"}", "done": true}"#;
        assert_eq!(
            OllamaClient::parse_text(body).unwrap(),
            r#"{"mnemonic": "fawn"}"#
        );
    }

    #[test]
    fn parse_text_defaults_to_empty() {
        assert_eq!(OllamaClient::parse_text(r#"{"done": true}"#).unwrap(), "");
    }
}
