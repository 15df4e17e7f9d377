//! Room model and form range limits
//!
//! A [`RoomSpec`] can only be built with strictly positive, finite
//! dimensions and spacing, which is what lets the grid fill in
//! [`crate::layout`] terminate without further checks.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Room dimensions and speaker spacing, in meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoomSpec {
    width_m: f64,
    length_m: f64,
    spacing_m: f64,
}

impl RoomSpec {
    /// Create a room spec
    ///
    /// Fails with [`Error::InvalidInput`] unless width, length and spacing are
    /// all finite and greater than zero.
    pub fn new(width_m: f64, length_m: f64, spacing_m: f64) -> Result<Self> {
        for (name, value) in [("width", width_m), ("length", length_m), ("spacing", spacing_m)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidInput(format!(
                    "room {} must be a positive number of meters, got {}",
                    name, value
                )));
            }
        }

        Ok(Self {
            width_m,
            length_m,
            spacing_m,
        })
    }

    pub fn width_m(&self) -> f64 {
        self.width_m
    }

    pub fn length_m(&self) -> f64 {
        self.length_m
    }

    pub fn spacing_m(&self) -> f64 {
        self.spacing_m
    }

    /// Floor area in square meters
    pub fn area_m2(&self) -> f64 {
        self.width_m * self.length_m
    }
}

/// Kind of room being equipped
///
/// Informational only: echoed back with the design, never consulted by the
/// layout or recommendation engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    #[serde(rename = "Restaurant")]
    Restaurant,
    #[serde(rename = "Meeting Room")]
    MeetingRoom,
    #[serde(rename = "Retail Shop")]
    RetailShop,
    #[serde(rename = "Live Venue")]
    LiveVenue,
    #[serde(rename = "Church")]
    Church,
}

impl RoomType {
    pub fn display_name(&self) -> &'static str {
        match self {
            RoomType::Restaurant => "Restaurant",
            RoomType::MeetingRoom => "Meeting Room",
            RoomType::RetailShop => "Retail Shop",
            RoomType::LiveVenue => "Live Venue",
            RoomType::Church => "Church",
        }
    }

    /// All room types, in form order
    pub fn all_variants() -> &'static [RoomType] {
        &[
            RoomType::Restaurant,
            RoomType::MeetingRoom,
            RoomType::RetailShop,
            RoomType::LiveVenue,
            RoomType::Church,
        ]
    }
}

impl Default for RoomType {
    fn default() -> Self {
        RoomType::Restaurant
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Inclusive numeric range accepted by one form field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeLimit {
    pub field: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl RangeLimit {
    /// Return `value` if it lies within `[min, max]`
    pub fn check(&self, value: f64) -> Result<f64> {
        if value.is_finite() && value >= self.min && value <= self.max {
            Ok(value)
        } else {
            Err(Error::InvalidInput(format!(
                "{} must be between {} and {}, got {}",
                self.field, self.min, self.max, value
            )))
        }
    }
}

/// Numeric range constraints of the design form
///
/// These are the only input validation the designer performs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FormLimits {
    pub room_width_m: RangeLimit,
    pub room_length_m: RangeLimit,
    pub spacing_m: RangeLimit,
    pub coverage_radius_m: RangeLimit,
    pub budget_thb: RangeLimit,
    /// Smallest accepted scale reference pixel length
    pub min_reference_pixels: f64,
}

pub const FORM_LIMITS: FormLimits = FormLimits {
    room_width_m: RangeLimit {
        field: "room width (m)",
        min: 1.0,
        max: 100.0,
        default: 12.0,
    },
    room_length_m: RangeLimit {
        field: "room length (m)",
        min: 1.0,
        max: 100.0,
        default: 20.0,
    },
    spacing_m: RangeLimit {
        field: "speaker spacing (m)",
        min: 2.0,
        max: 10.0,
        default: 6.0,
    },
    coverage_radius_m: RangeLimit {
        field: "coverage radius (m)",
        min: 2.0,
        max: 10.0,
        default: 5.0,
    },
    budget_thb: RangeLimit {
        field: "budget (THB)",
        min: 10_000.0,
        max: 1_000_000.0,
        default: 100_000.0,
    },
    min_reference_pixels: 1.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_spec_accepts_positive_values() {
        let room = RoomSpec::new(12.0, 20.0, 6.0).unwrap();
        assert_eq!(room.width_m(), 12.0);
        assert_eq!(room.length_m(), 20.0);
        assert_eq!(room.spacing_m(), 6.0);
        assert_eq!(room.area_m2(), 240.0);
    }

    #[test]
    fn test_room_spec_rejects_zero_spacing() {
        assert!(matches!(
            RoomSpec::new(12.0, 20.0, 0.0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_room_spec_rejects_negative_and_nan() {
        assert!(RoomSpec::new(-1.0, 20.0, 6.0).is_err());
        assert!(RoomSpec::new(12.0, f64::NAN, 6.0).is_err());
        assert!(RoomSpec::new(12.0, 20.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_range_limit_is_inclusive() {
        let limit = FORM_LIMITS.spacing_m;
        assert_eq!(limit.check(2.0).unwrap(), 2.0);
        assert_eq!(limit.check(10.0).unwrap(), 10.0);
        assert!(limit.check(1.99).is_err());
        assert!(limit.check(10.01).is_err());
    }

    #[test]
    fn test_range_limit_message_names_field() {
        let err = FORM_LIMITS.budget_thb.check(5.0).unwrap_err();
        assert!(err.to_string().contains("budget (THB)"));
    }

    #[test]
    fn test_room_type_serde_uses_display_names() {
        let json = serde_json::to_string(&RoomType::MeetingRoom).unwrap();
        assert_eq!(json, "\"Meeting Room\"");
        let parsed: RoomType = serde_json::from_str("\"Live Venue\"").unwrap();
        assert_eq!(parsed, RoomType::LiveVenue);
    }
}
