mod account;
mod alerts;
mod api_client;
mod board;
mod community;
mod config;
mod errors;
mod job_lists;
mod listing;
mod models;
mod notice;
mod routes;
mod services;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::api_client::ApiClient;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting WorkHub v{}", env!("CARGO_PKG_VERSION"));

    let client = ApiClient::new(
        config.api_url.clone(),
        config.api_key.clone(),
        config.access_token.clone(),
        config.http_timeout_secs,
    )?;
    info!(
        "Backend client initialized ({}, signed in: {})",
        config.api_url,
        config.access_token.is_some()
    );
    info!(
        "Session cache at {} (page size {})",
        config.session_cache_path.display(),
        config.page_size
    );

    let state = AppState::new(Arc::new(client), config.clone());

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
