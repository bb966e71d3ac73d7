//! althingd — Althing debate proxy daemon.
//!
//! Serves the debate continuation endpoint over HTTP/SSE, bridging
//! browser clients to the upstream completion provider.

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use althing::AnthropicProvider;
use althing::server::{self, AppState, Config, Secrets};

/// Althing daemon — debate streaming proxy.
#[derive(Parser)]
#[command(name = "althingd")]
#[command(version = althing::PKG_VERSION)]
#[command(about = "Althing debate proxy daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let secrets = Secrets::load()?;

    info!(version = althing::version_string(), "althingd starting");

    let state = match secrets.anthropic_api_key() {
        Some(key) => {
            let mut provider = AnthropicProvider::new(key)
                .model(&config.upstream.model)
                .max_tokens(config.upstream.max_tokens);
            if let Some(base_url) = &config.upstream.base_url {
                provider = provider.base_url(base_url);
            }
            AppState::new(Arc::new(provider))
        }
        None => {
            warn!("no Anthropic API key configured; debate requests will answer 500");
            AppState::without_provider()
        }
    };

    server::serve(state, &config).await?;

    Ok(())
}
