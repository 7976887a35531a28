//! HTTP server configuration: bind address and CORS policy.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

const ANY_ORIGIN: &str = "*";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins. Empty (or `*`) means every origin, with credentials.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Bind on all interfaces instead of loopback.
    pub fn public(mut self) -> Self {
        self.host = "0.0.0.0".to_string();
        self
    }

    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o.trim() == ANY_ORIGIN)
    }

    /// Parse the restricted origin list, failing on the first entry that is
    /// not a valid header value.
    pub fn allowed_origins(&self) -> Result<Vec<HeaderValue>> {
        self.cors_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin.trim())
                    .with_context(|| format!("invalid CORS origin {origin:?}"))
            })
            .collect()
    }
}

/// Which LLM backend the explanation provider talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Anthropic Messages API or a compatible local server (LM Studio)
    #[default]
    Anthropic,
    /// Ollama `/api/generate`
    Ollama,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::Ollama => "ollama",
        }
    }
}
