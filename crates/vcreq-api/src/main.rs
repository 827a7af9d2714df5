//! # vcreq-api: Binary Entry Point
//!
//! Starts the HTTP server with mock DID adapters for every method.
//! Binds to 127.0.0.1:7000 unless configured otherwise.

use std::net::IpAddr;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use vcreq_api::config::{AppConfig, LogFormat};
use vcreq_api::state::AppState;

/// vcreq core API server.
///
/// Configuration is read from `VCREQ_*` environment variables; flags given
/// here take precedence.
#[derive(Parser, Debug)]
#[command(name = "vcreq-api", version, about, long_about = None)]
struct Cli {
    /// Port to listen on.
    #[arg(long)]
    port: Option<u16>,

    /// Address to bind.
    #[arg(long)]
    bind_address: Option<IpAddr>,

    /// Public base URL advertised in the OpenAPI document. Repeatable.
    #[arg(long = "api-target-url")]
    api_target_urls: Vec<Url>,
}

impl Cli {
    fn apply(self, config: &mut AppConfig) {
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(bind_address) = self.bind_address {
            config.bind_address = bind_address;
        }
        if !self.api_target_urls.is_empty() {
            config.api_target_urls = self.api_target_urls;
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::from_env().context("loading configuration")?;
    cli.apply(&mut config);
    init_tracing(config.log_format);

    let addr = config.socket_addr();
    let state = AppState::with_mock_services(config);
    tracing::info!(dispatcher = ?state.dids, "DID adapters registered");

    let app = vcreq_api::app(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("vcreq API listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
