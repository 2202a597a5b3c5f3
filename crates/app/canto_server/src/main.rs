//! Canto chat relay server binary.
//!
//! Serves the landing page, the chat page and the `/api/chat` relay.

use clap::Parser;
use tracing::{info, warn};

use canto_api::config::ApiConfig;

/// CLI arguments for the relay server. Flags override the environment.
#[derive(Parser, Debug)]
#[command(name = "canto_server", about = "Canto chat relay server", version)]
struct Args {
    /// Address to listen on (default `BIND_ADDR` or 127.0.0.1:3100).
    #[arg(long)]
    bind_addr: Option<String>,

    /// Root of the OpenAI-compatible API (default `OPENAI_BASE_URL`).
    #[arg(long)]
    openai_base_url: Option<String>,

    /// Model sent with every completion (default `OPENAI_MODEL` or gpt-4o-mini).
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,canto_api=debug,canto_core=debug".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = ApiConfig::from_env();
    if let Some(bind_addr) = args.bind_addr {
        config.bind_addr = bind_addr;
    }
    if let Some(base_url) = args.openai_base_url {
        config.openai_base_url = base_url;
    }
    if let Some(model) = args.model {
        config.model = model;
    }

    if config.api_key.resolve().is_none() {
        warn!("OPENAI_API_KEY is not set; /api/chat will answer 500 until it is");
    }

    info!(
        version = canto_core::version(),
        model = %config.model,
        base_url = %config.openai_base_url,
        "starting canto_server"
    );

    let state = canto_api::AppState::openai(config.clone())?;
    let app = canto_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}
