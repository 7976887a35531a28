pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{ExplainWordUseCase, ExplanationProvider};

pub use connector::{
    AnthropicClient, ChatClient, Container, ContainerConfig, HttpServer, HttpServerConfig,
    LlmExplanationProvider, OllamaClient, ProviderKind, ScriptedExplanationProvider, TutorNotes,
};

pub use domain::{
    DomainError, Explanation, ExplanationRequest, ExplanationResult, RetryPolicy,
    DEFAULT_MAX_ATTEMPTS,
};

pub use cli::Commands;
