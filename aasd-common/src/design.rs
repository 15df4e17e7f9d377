//! One design submission, end to end
//!
//! [`DesignForm`] is the raw form as posted by the presentation layer.
//! [`DesignForm::validate`] applies the form range limits and produces a
//! [`DesignRequest`]; [`plan_design`] then runs placement, scale conversion
//! and (when a catalog is available) recommendation.
//!
//! Geometry never depends on the catalog: a catalog load failure only
//! replaces the recommendation with [`RecommendationOutcome::CatalogUnavailable`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::floorplan::render_layout_svg;
use crate::layout::{generate_positions, SpeakerPosition};
use crate::recommend::{
    recommend, MountType, RecommendationQuery, RecommendationResult, UseCase, UseCaseSelection,
};
use crate::room::{RoomSpec, RoomType, FORM_LIMITS};
use crate::scale::{scale_caption, scale_factor, PlanReference};
use crate::{Error, Result};

/// Design form as submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignForm {
    #[serde(default)]
    pub room_type: RoomType,

    #[serde(default = "default_width")]
    pub room_width_m: f64,

    #[serde(default = "default_length")]
    pub room_length_m: f64,

    #[serde(default = "default_spacing")]
    pub spacing_m: f64,

    #[serde(default = "default_coverage")]
    pub coverage_radius_m: f64,

    #[serde(default = "default_budget")]
    pub budget_thb: u64,

    /// Use-case name; unrecognized names select the custom fallback
    #[serde(default = "default_use_case")]
    pub use_case: String,

    #[serde(default)]
    pub mount_type: Option<MountType>,

    /// Explicit speaker type for the custom fallback
    #[serde(default)]
    pub speaker_type: Option<String>,

    /// Scale reference measured on an uploaded plan image
    #[serde(default)]
    pub plan_reference: Option<PlanReference>,
}

fn default_width() -> f64 {
    FORM_LIMITS.room_width_m.default
}

fn default_length() -> f64 {
    FORM_LIMITS.room_length_m.default
}

fn default_spacing() -> f64 {
    FORM_LIMITS.spacing_m.default
}

fn default_coverage() -> f64 {
    FORM_LIMITS.coverage_radius_m.default
}

fn default_budget() -> u64 {
    FORM_LIMITS.budget_thb.default as u64
}

fn default_use_case() -> String {
    UseCase::default().display_name().to_string()
}

impl Default for DesignForm {
    fn default() -> Self {
        Self {
            room_type: RoomType::default(),
            room_width_m: default_width(),
            room_length_m: default_length(),
            spacing_m: default_spacing(),
            coverage_radius_m: default_coverage(),
            budget_thb: default_budget(),
            use_case: default_use_case(),
            mount_type: None,
            speaker_type: None,
            plan_reference: None,
        }
    }
}

impl DesignForm {
    /// Check every numeric field against [`FORM_LIMITS`]
    pub fn validate(&self) -> Result<DesignRequest> {
        let width = FORM_LIMITS.room_width_m.check(self.room_width_m)?;
        let length = FORM_LIMITS.room_length_m.check(self.room_length_m)?;
        let spacing = FORM_LIMITS.spacing_m.check(self.spacing_m)?;
        let coverage_radius_m = FORM_LIMITS.coverage_radius_m.check(self.coverage_radius_m)?;
        FORM_LIMITS.budget_thb.check(self.budget_thb as f64)?;

        if let Some(reference) = &self.plan_reference {
            if !reference.pixel_length.is_finite()
                || reference.pixel_length < FORM_LIMITS.min_reference_pixels
            {
                return Err(Error::InvalidScaleReference(reference.pixel_length));
            }
            if !reference.length_m.is_finite() || reference.length_m <= 0.0 {
                return Err(Error::InvalidInput(format!(
                    "scale reference length must be a positive number of meters, got {}",
                    reference.length_m
                )));
            }
        }

        Ok(DesignRequest {
            room_type: self.room_type,
            room: RoomSpec::new(width, length, spacing)?,
            coverage_radius_m,
            budget_thb: self.budget_thb,
            selection: UseCaseSelection::resolve(&self.use_case, self.speaker_type.clone()),
            mount: self.mount_type,
            plan_reference: self.plan_reference,
        })
    }
}

/// Validated design submission
#[derive(Debug, Clone, PartialEq)]
pub struct DesignRequest {
    pub room_type: RoomType,
    pub room: RoomSpec,
    pub coverage_radius_m: f64,
    pub budget_thb: u64,
    pub selection: UseCaseSelection,
    pub mount: Option<MountType>,
    pub plan_reference: Option<PlanReference>,
}

/// Plan scale annotation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleAnnotation {
    pub meters_per_pixel: f64,
    pub caption: String,
}

/// Recommendation part of a design
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationOutcome {
    Recommended(RecommendationResult),
    /// The catalog could not be loaded; recommendation was not attempted
    CatalogUnavailable { reason: String },
}

/// Everything the presentation layer displays for one submission
#[derive(Debug, Clone, PartialEq)]
pub struct DesignOutcome {
    pub room_type: RoomType,
    pub room: RoomSpec,
    pub positions: Vec<SpeakerPosition>,
    pub layout_svg: String,
    pub scale: Option<ScaleAnnotation>,
    pub recommendation: RecommendationOutcome,
}

impl DesignOutcome {
    pub fn speaker_count(&self) -> usize {
        self.positions.len()
    }

    pub fn count_message(&self) -> String {
        format!("Suggested number of speakers: {}", self.positions.len())
    }
}

/// Run one design submission
///
/// `catalog` is the outcome of loading the product table; an `Err` skips the
/// recommendation step but still yields the full geometry.
pub fn plan_design(
    request: &DesignRequest,
    catalog: std::result::Result<&Catalog, &Error>,
) -> Result<DesignOutcome> {
    info!(
        "Designing {} {}m x {}m at {}m spacing ({:?})",
        request.room_type,
        request.room.width_m(),
        request.room.length_m(),
        request.room.spacing_m(),
        request.selection
    );

    let positions = generate_positions(&request.room);
    let layout_svg = render_layout_svg(&request.room, &positions, request.coverage_radius_m);

    let scale = match &request.plan_reference {
        Some(reference) => {
            let meters_per_pixel = scale_factor(reference.length_m, reference.pixel_length)?;
            debug!("Plan scale: {} m/px", meters_per_pixel);
            Some(ScaleAnnotation {
                meters_per_pixel,
                caption: scale_caption(meters_per_pixel),
            })
        }
        None => None,
    };

    let recommendation = match catalog {
        Ok(catalog) => {
            let query = RecommendationQuery {
                selection: request.selection.clone(),
                mount: request.mount,
                item_count: positions.len(),
            };
            RecommendationOutcome::Recommended(recommend(catalog, &query, request.budget_thb))
        }
        Err(e) => {
            warn!("Skipping recommendation: {}", e);
            RecommendationOutcome::CatalogUnavailable {
                reason: e.to_string(),
            }
        }
    };

    Ok(DesignOutcome {
        room_type: request.room_type,
        room: request.room,
        positions,
        layout_svg,
        scale,
        recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_matches_form_defaults() {
        let request = DesignForm::default().validate().unwrap();
        assert_eq!(request.room.width_m(), 12.0);
        assert_eq!(request.room.length_m(), 20.0);
        assert_eq!(request.room.spacing_m(), 6.0);
        assert_eq!(request.coverage_radius_m, 5.0);
        assert_eq!(request.budget_thb, 100_000);
        assert_eq!(
            request.selection,
            UseCaseSelection::Known {
                use_case: UseCase::GeneralPurpose
            }
        );
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let form = DesignForm {
            spacing_m: 1.0,
            ..DesignForm::default()
        };
        assert!(matches!(form.validate(), Err(Error::InvalidInput(_))));

        let form = DesignForm {
            room_width_m: 101.0,
            ..DesignForm::default()
        };
        assert!(form.validate().is_err());

        let form = DesignForm {
            budget_thb: 9_999,
            ..DesignForm::default()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_zero_pixel_reference_rejected() {
        let form = DesignForm {
            plan_reference: Some(PlanReference {
                length_m: 10.0,
                pixel_length: 0.0,
            }),
            ..DesignForm::default()
        };
        assert!(matches!(
            form.validate(),
            Err(Error::InvalidScaleReference(_))
        ));
    }

    #[test]
    fn test_unknown_use_case_becomes_custom() {
        let form = DesignForm {
            use_case: "Karaoke".to_string(),
            speaker_type: Some("Subwoofer".to_string()),
            ..DesignForm::default()
        };
        let request = form.validate().unwrap();
        assert_eq!(
            request.selection,
            UseCaseSelection::Custom {
                speaker_type: Some("Subwoofer".to_string())
            }
        );
    }

    #[test]
    fn test_plan_design_with_scale_reference() {
        let form = DesignForm {
            plan_reference: Some(PlanReference {
                length_m: 10.0,
                pixel_length: 1000.0,
            }),
            ..DesignForm::default()
        };
        let request = form.validate().unwrap();
        let catalog = Catalog::new(Vec::new(), false);
        let outcome = plan_design(&request, Ok(&catalog)).unwrap();

        assert_eq!(outcome.speaker_count(), 6);
        assert_eq!(outcome.count_message(), "Suggested number of speakers: 6");
        let scale = outcome.scale.unwrap();
        assert_eq!(scale.meters_per_pixel, 0.01);
        assert_eq!(scale.caption, "Scale: 1 px = 0.0100 m");
    }

    #[test]
    fn test_catalog_failure_keeps_geometry() {
        let request = DesignForm::default().validate().unwrap();
        let catalog = Catalog::new(Vec::new(), false);
        let failure = Error::catalog_load("missing.csv", "No such file or directory");

        let with_catalog = plan_design(&request, Ok(&catalog)).unwrap();
        let without_catalog = plan_design(&request, Err(&failure)).unwrap();

        assert_eq!(with_catalog.positions, without_catalog.positions);
        assert_eq!(with_catalog.layout_svg, without_catalog.layout_svg);
        match without_catalog.recommendation {
            RecommendationOutcome::CatalogUnavailable { reason } => {
                assert!(reason.contains("missing.csv"));
            }
            other => panic!("expected unavailable catalog, got {:?}", other),
        }
    }
}
