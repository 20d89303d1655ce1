//! Main entry point for the authentication backend.
//!
//! This file initializes logging, loads configuration, opens the database,
//! and registers all routes and middleware before serving.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod state;
mod utils;


use anyhow::{Context, Result};
use axum::{Json, Router, routing::get};
use config::Config;
use database::Database;
use serde_json::{Value, json};
use state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    info!("Loaded configuration: {:?}", config);

    let db = Database::new(&config).await?;
    let state = AppState::from_pool(db.pool().clone(), &config);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;

    info!("Starting server on port {}", config.server_port);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

/// Builds the full application router.
fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::auth_router())
        .merge(api::protected::routes::protected_router(state.clone()))
        .with_state(state)
}

async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
