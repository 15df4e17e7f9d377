//! Form options endpoint
//!
//! Lists the selectable values and numeric limits so the form never drifts
//! from what the engine accepts.

use aasd_common::recommend::{MountType, UseCase, DEFAULT_CUSTOM_TYPE};
use aasd_common::room::{FormLimits, RoomType, FORM_LIMITS};
use axum::Json;
use serde::Serialize;

/// Form option lists and limits
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub room_types: Vec<&'static str>,
    pub use_cases: Vec<&'static str>,
    pub mount_types: Vec<MountType>,
    pub default_custom_type: &'static str,
    pub limits: FormLimits,
}

/// GET /api/options
pub async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        room_types: RoomType::all_variants()
            .iter()
            .map(|r| r.display_name())
            .collect(),
        use_cases: UseCase::all_variants()
            .iter()
            .map(|u| u.display_name())
            .collect(),
        mount_types: MountType::all_variants().to_vec(),
        default_custom_type: DEFAULT_CUSTOM_TYPE,
        limits: FORM_LIMITS,
    })
}
