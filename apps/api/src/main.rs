use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pathweaver_api::config::Config;
use pathweaver_api::db::create_pool;
use pathweaver_api::generation::generator::PathGenerator;
use pathweaver_api::llm_client::LlmClient;
use pathweaver_api::profiles::PgProfileStore;
use pathweaver_api::resources::OpenSearchIndex;
use pathweaver_api::routes::build_router;
use pathweaver_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
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

    info!("Starting PathWeaver API v{}", env!("CARGO_PKG_VERSION"));

    // Profile store (PostgreSQL)
    let db = create_pool(&config.database_url).await?;
    let profiles = PgProfileStore::new(db, &config.profile_table)
        .context("Failed to initialize profile store")?;
    info!("Profile store initialized (table: {})", config.profile_table);

    // Resource index (OpenSearch)
    let resources = OpenSearchIndex::new(
        &config.opensearch_url,
        &config.resource_index,
        config.opensearch_auth.clone(),
        config.http_timeout,
    )
    .context("Failed to build search client")?;
    info!("Resource index initialized (index: {})", config.resource_index);

    // Completion model
    let llm = LlmClient::new(
        config.anthropic_api_url.clone(),
        config.anthropic_api_key.clone(),
        config.llm_model.clone(),
        config.http_timeout,
    )
    .context("Failed to build LLM client")?;
    info!(
        "LLM client initialized (model: {}, max_tokens: {}, temperature: {})",
        llm.model(),
        config.generation.max_tokens,
        config.generation.temperature
    );

    let generator = PathGenerator::new(
        Arc::new(profiles),
        Arc::new(resources),
        Arc::new(llm),
        config.generation,
    );

    let state = AppState {
        generator: Arc::new(generator),
        malformed_requests: config.malformed_requests,
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
