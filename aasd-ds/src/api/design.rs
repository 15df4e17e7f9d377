//! Design submission endpoint
//!
//! A catalog load failure is part of a successful response: the layout is
//! still returned, and the recommendation section carries the failure
//! message instead of a product table.

use aasd_common::design::{plan_design, DesignForm, RecommendationOutcome, ScaleAnnotation};
use aasd_common::layout::SpeakerPosition;
use aasd_common::recommend::{format_thb, RecommendationResult};
use aasd_common::RoomSpec;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::{error::ApiResult, AppState};

/// Response for one design submission
#[derive(Debug, Serialize)]
pub struct DesignResponse {
    pub room_type: String,
    pub room: RoomSpec,
    pub positions: Vec<SpeakerPosition>,
    pub speaker_count: usize,
    pub count_message: String,
    pub layout_svg: String,
    pub scale: Option<ScaleAnnotation>,
    pub recommendation: RecommendationResponse,
}

/// Recommendation section of a design response
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationResponse {
    Recommended {
        use_case: String,
        type_patterns: Vec<String>,
        min_spl_db: Option<f64>,
        spl_filter_applied: bool,
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
        total_cost: f64,
        total_cost_display: String,
        budget: u64,
        budget_display: String,
        within_budget: bool,
        budget_message: String,
    },
    CatalogUnavailable {
        message: String,
    },
}

impl RecommendationResponse {
    fn recommended(use_case: String, result: RecommendationResult) -> Self {
        RecommendationResponse::Recommended {
            use_case,
            columns: result.columns(),
            rows: result.rows(),
            total_cost_display: format_thb(result.total_cost),
            budget_display: format_thb(result.budget as f64),
            budget_message: result.budget_message().to_string(),
            type_patterns: result.filter.type_patterns,
            min_spl_db: result.filter.min_spl_db,
            spl_filter_applied: result.spl_filter_applied,
            total_cost: result.total_cost,
            budget: result.budget,
            within_budget: result.within_budget,
        }
    }
}

/// POST /api/design
pub async fn submit_design(
    State(state): State<AppState>,
    payload: Result<Json<DesignForm>, JsonRejection>,
) -> ApiResult<Json<DesignResponse>> {
    let Json(form) = payload?;
    let request = form.validate()?;

    let catalog = state.catalog.get().await;
    let outcome = plan_design(&request, catalog.as_deref())?;

    info!(
        "Design complete: {} speakers for {} ({})",
        outcome.speaker_count(),
        outcome.room_type,
        request.selection.label()
    );

    let count_message = outcome.count_message();
    let recommendation = match outcome.recommendation {
        RecommendationOutcome::Recommended(result) => {
            RecommendationResponse::recommended(request.selection.label(), result)
        }
        RecommendationOutcome::CatalogUnavailable { reason } => {
            RecommendationResponse::CatalogUnavailable {
                message: format!("Product database not found or invalid: {}", reason),
            }
        }
    };

    Ok(Json(DesignResponse {
        room_type: outcome.room_type.display_name().to_string(),
        room: outcome.room,
        speaker_count: outcome.positions.len(),
        count_message,
        positions: outcome.positions,
        layout_svg: outcome.layout_svg,
        scale: outcome.scale,
        recommendation,
    }))
}
