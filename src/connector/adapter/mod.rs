mod anthropic_client;
mod chat_client;
mod llm_explanation_provider;
mod ollama_client;
mod scripted_explanation_provider;

pub use anthropic_client::AnthropicClient;
pub use chat_client::ChatClient;
pub use llm_explanation_provider::*;
pub use ollama_client::OllamaClient;
pub use scripted_explanation_provider::*;
