mod analysis;
mod config;
mod errors;
mod gate;
mod models;
mod pages;
mod profile_client;
mod routes;
mod state;
mod upload;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::profile_client::ProfileClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Analyzer web v{}", env!("CARGO_PKG_VERSION"));

    let client = ProfileClient::new(&config.analysis_api_url, config.analysis_timeout)?;
    info!(
        "Analysis service endpoint: {} (timeout {}s)",
        client.endpoint(),
        config.analysis_timeout.as_secs()
    );
    info!(
        "Upload limit {} MB, at most {} analysis in flight",
        config.max_upload_mb, config.max_concurrent_analyses
    );

    let state = AppState::new(config.clone(), Arc::new(client));

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
