use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use word_explainer::{
    Commands, Container, ContainerConfig, ExplanationRequest, HttpServer, HttpServerConfig,
    ProviderKind, DEFAULT_MAX_ATTEMPTS,
};

#[derive(Parser)]
#[command(name = "word-explainer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// LLM backend used to produce explanations
    #[arg(long, global = true, value_enum, default_value_t = ProviderKind::Anthropic)]
    provider: ProviderKind,

    /// Serve a canned explanation instead of calling a model
    #[arg(long, global = true)]
    mock_provider: bool,

    /// Provider calls allowed per request before an empty explanation is returned
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Milliseconds to wait between empty answers (0 retries immediately)
    #[arg(long, global = true, default_value = "0")]
    retry_delay_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let container = Arc::new(Container::new(ContainerConfig {
        provider: cli.provider,
        mock_provider: cli.mock_provider,
        max_attempts: cli.max_attempts,
        retry_delay: Duration::from_millis(cli.retry_delay_ms),
    })?);

    info!(
        "Explanation provider: {} (max_attempts={})",
        container.provider_name(),
        container.policy().max_attempts()
    );
    if !container.policy().has_delay() {
        warn!("Empty answers are retried immediately; a provider that never answers will be called back to back");
    }

    match cli.command {
        Commands::Serve {
            port,
            host,
            public,
            cors_origins,
        } => {
            let mut config = HttpServerConfig {
                host,
                port,
                cors_origins,
            };
            if public {
                config = config.public();
            }

            let server = HttpServer::new(container, config)?;
            cancel_on_ctrl_c(server.shutdown_token());
            server.start().await?;
        }

        Commands::Explain { word, context } => {
            let request = ExplanationRequest::new(word, context);
            let cancel = CancellationToken::new();
            cancel_on_ctrl_c(cancel.clone());

            let explanation = container
                .explain_use_case()
                .execute_with_cancellation(&request, &cancel)
                .await?;

            if explanation.is_empty() {
                println!(
                    "No explanation after {} attempts.",
                    explanation.attempts()
                );
            } else {
                println!("{}", explanation.text());
            }
        }
    }

    Ok(())
}

fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down");
            token.cancel();
        }
    });
}
