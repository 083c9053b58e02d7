//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! billing crate.

use anyhow::Context;
use axum::{Router, routing::get};
use billing::application::config::{DEFAULT_STORAGE_ROOT, SharedSecret};
use billing::{BillingConfig, CorruptJournalPolicy, FileJournalStore, billing_router};
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,billing=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_billing_config()?;

    tracing::info!(
        storage_root = %config.storage_root.display(),
        secret_header = %config.secret_header,
        corrupt_journal_policy = ?config.corrupt_journal_policy,
        "Billing configuration loaded"
    );

    // Startup: create the storage root and drop temp files from a crash
    FileJournalStore::new(&config.storage_root, config.corrupt_journal_policy)
        .prepare()
        .await
        .context("failed to prepare journal storage")?;

    // Build router
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest("/billing", billing_router(config))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("BIND_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Billing configuration from the process environment
fn load_billing_config() -> anyhow::Result<BillingConfig> {
    let secret = env::var("BILLING_SECRET").context("BILLING_SECRET must be set")?;
    let secret = SharedSecret::new(secret).context("BILLING_SECRET is invalid")?;

    let storage_root =
        env::var("BILLING_STORAGE_ROOT").unwrap_or_else(|_| DEFAULT_STORAGE_ROOT.to_string());

    let policy = match env::var("BILLING_CORRUPT_JOURNAL_POLICY") {
        Ok(raw) => raw
            .parse::<CorruptJournalPolicy>()
            .map_err(anyhow::Error::msg)?,
        Err(_) => CorruptJournalPolicy::default(),
    };

    Ok(BillingConfig::new(secret, storage_root).with_corrupt_journal_policy(policy))
}

/// Resolves on Ctrl+C. In-flight charges finish before the server exits.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
