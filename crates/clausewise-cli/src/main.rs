mod analyze;
mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use clausewise_api::Analyzer;
use tracing_subscriber::EnvFilter;

use crate::config::BackendArgs;

#[derive(Parser)]
#[command(name = "clausewise", version, about = "Contract risk scoring via a hosted LLM")]
struct Cli {
    #[command(flatten)]
    backend: BackendArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve POST /api/analyze over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, env = "CLAUSEWISE_BIND", default_value = "0.0.0.0:3000")]
        bind: SocketAddr,
    },
    /// Analyse a contract file (or - for stdin) and print the result as JSON
    Analyze {
        /// Path to a plain-text contract
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("clausewise v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = cli.backend.resolve_from_env();
    if config.api_key().is_none() {
        tracing::warn!(
            var = config.provider.api_key_var(),
            "no API key configured; analysis requests will fail until it is set"
        );
    }
    let analyzer = Arc::new(Analyzer::with_chat_client(config));

    match cli.command {
        Commands::Serve { bind } => {
            let listener = tokio::net::TcpListener::bind(bind)
                .await
                .with_context(|| format!("binding {bind}"))?;
            clausewise_api::serve(listener, analyzer)
                .await
                .context("serving HTTP")?;
        }
        Commands::Analyze { path } => {
            let result = analyze::run_analyze(&analyzer, &path).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}
