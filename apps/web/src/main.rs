mod client;
mod config;
mod errors;
mod handlers;
mod pages;
mod preferences;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::client::GatewayClient;
use crate::config::Config;
use crate::pages::Pages;
use crate::routes::build_router;
use crate::state::WebState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PathWeaver web v{}", env!("CARGO_PKG_VERSION"));

    let gateway = GatewayClient::new(&config.api_endpoint, config.gateway_timeout)
        .context("Failed to build gateway client")?;
    info!("Gateway endpoint: {}", config.api_endpoint);

    let pages = Pages::new().context("Failed to load page templates")?;

    let app = build_router(WebState {
        gateway,
        pages: Arc::new(pages),
    });

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
