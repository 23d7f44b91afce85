use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use scout::config::ServerConfig;
use scout::llm_client::{self, LlmClient};
use scout::routes::build_router;
use scout::search::SerpApiClient;
use scout::state::AppState;
use scout::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = ServerConfig::from_env()?;

    init_tracing(&config.rust_log);

    info!("Starting Scout API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.llm.api_key.clone(), config.llm.base_url.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let search = SerpApiClient::new(config.serp_api_key.clone())?;
    info!("Search client initialized");

    let state = AppState {
        llm: Arc::new(llm),
        search: Arc::new(search),
        max_upload_bytes: config.max_upload_bytes,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
