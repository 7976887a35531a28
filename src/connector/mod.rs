//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - Explanation providers (LLM-backed and scripted)
//! - LLM chat clients (Anthropic Messages API, Ollama)
//! - HTTP API (axum router, controllers, server)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;
