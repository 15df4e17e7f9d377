//! aasd-ds library - Design Service
//!
//! HTTP presentation layer for the AASD layout and recommendation engine:
//! serves the design form, runs design submissions and exposes the product
//! catalog.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod catalog_store;
pub mod error;

use catalog_store::CatalogStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Product catalog source (read-only)
    pub catalog: Arc<CatalogStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(catalog: CatalogStore) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/api/design", post(api::submit_design))
        .route("/api/catalog", get(api::get_catalog))
        .route("/api/options", get(api::get_options));

    // Form page and static assets
    let public = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
