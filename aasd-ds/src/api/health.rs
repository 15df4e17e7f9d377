//! Service health and build identification
//!
//! The service is healthy whenever it can answer: layouts never depend on
//! the catalog. Catalog state is reported alongside so an operator can tell
//! why recommendations are missing.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// GET /health body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub build: BuildInfo,
    pub catalog: CatalogHealth,
}

/// Values stamped in by build.rs
#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub git_hash: &'static str,
    pub timestamp: &'static str,
    pub profile: &'static str,
}

impl BuildInfo {
    pub const CURRENT: BuildInfo = BuildInfo {
        git_hash: env!("GIT_HASH"),
        timestamp: env!("BUILD_TIMESTAMP"),
        profile: env!("BUILD_PROFILE"),
    };
}

/// Whether recommendations can currently be produced
#[derive(Debug, Serialize)]
pub struct CatalogHealth {
    pub path: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let path = state.catalog.path().display().to_string();
    let catalog = match state.catalog.get().await {
        Ok(catalog) => CatalogHealth {
            path,
            available: true,
            product_count: Some(catalog.len()),
            error: None,
        },
        Err(e) => CatalogHealth {
            path,
            available: false,
            product_count: None,
            error: Some(e.to_string()),
        },
    };

    Json(HealthResponse {
        status: "ok",
        module: "aasd-ds",
        version: env!("CARGO_PKG_VERSION"),
        build: BuildInfo::CURRENT,
        catalog,
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
