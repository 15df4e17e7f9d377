//! Catalog inspection endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::{error::ApiResult, AppState};

/// Full catalog in tabular form
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub path: String,
    pub product_count: usize,
    pub has_spl_column: bool,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// GET /api/catalog
///
/// Returns 503 `CATALOG_UNAVAILABLE` when the file cannot be loaded.
pub async fn get_catalog(State(state): State<AppState>) -> ApiResult<Json<CatalogResponse>> {
    let catalog = state.catalog.get().await?;

    let rows = catalog
        .records()
        .iter()
        .map(|record| record.to_row(catalog.has_spl_column()))
        .collect();

    Ok(Json(CatalogResponse {
        path: state.catalog.path().display().to_string(),
        product_count: catalog.len(),
        has_spl_column: catalog.has_spl_column(),
        columns: catalog.columns(),
        rows,
    }))
}
