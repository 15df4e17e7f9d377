//! aasd-ds (Design Service) - Main entry point
//!
//! Serves the audio system design form: speaker layout, floor-plan scale
//! annotation and equipment recommendation from the product catalog.
//!
//! The service starts even when the catalog is missing; designs are then
//! returned without recommendations.

use std::net::SocketAddr;
use std::path::PathBuf;

use aasd_common::config::{load_or_default, resolve_catalog_path, resolve_port};
use aasd_ds::api::health::BuildInfo;
use aasd_ds::catalog_store::CatalogStore;
use aasd_ds::{build_router, AppState};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for aasd-ds
#[derive(Parser, Debug)]
#[command(name = "aasd-ds")]
#[command(about = "Audio system design service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides AASD_PORT and the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Product catalog CSV (overrides AASD_CATALOG and the config file)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing so the log level can come from it
    let config = load_or_default(args.config.as_deref());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before anything that may take time
    let build = BuildInfo::CURRENT;
    info!(
        "Starting AASD Design Service (aasd-ds) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        build.git_hash,
        build.timestamp,
        build.profile
    );

    let catalog_path = resolve_catalog_path(args.catalog.as_deref(), &config);
    let port = resolve_port(args.port, &config);
    info!("Catalog path: {}", catalog_path.display());

    let store = CatalogStore::new(catalog_path);
    match store.get().await {
        Ok(catalog) => info!("✓ Catalog ready ({} products)", catalog.len()),
        Err(e) => warn!("Recommendations disabled until the catalog loads: {}", e),
    }

    let app = build_router(AppState::new(store));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("aasd-ds listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
