//! Floor-plan scale conversion
//!
//! Converts a reference line measured on an uploaded plan image into a
//! meters-per-pixel factor. The factor only annotates the displayed plan;
//! nothing else depends on it.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A reference line drawn on the plan image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanReference {
    /// Real-world length of the line in meters
    pub length_m: f64,
    /// Length of the same line on the image in pixels
    pub pixel_length: f64,
}

/// Meters represented by one image pixel
///
/// Fails with [`Error::InvalidScaleReference`] when `reference_pixel_length`
/// is not a positive finite number.
///
/// # Examples
/// ```
/// use aasd_common::scale::scale_factor;
///
/// assert_eq!(scale_factor(10.0, 1000.0).unwrap(), 0.01);
/// assert!(scale_factor(10.0, 0.0).is_err());
/// ```
pub fn scale_factor(reference_length_m: f64, reference_pixel_length: f64) -> Result<f64> {
    if !reference_pixel_length.is_finite() || reference_pixel_length <= 0.0 {
        return Err(Error::InvalidScaleReference(reference_pixel_length));
    }
    Ok(reference_length_m / reference_pixel_length)
}

/// Caption shown under the plan image
pub fn scale_caption(meters_per_pixel: f64) -> String {
    format!("Scale: 1 px = {:.4} m", meters_per_pixel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_factor_reference_value() {
        assert_eq!(scale_factor(10.0, 1000.0).unwrap(), 0.01);
    }

    #[test]
    fn test_scale_factor_rejects_non_positive_pixels() {
        assert!(matches!(
            scale_factor(10.0, 0.0),
            Err(Error::InvalidScaleReference(p)) if p == 0.0
        ));
        assert!(scale_factor(10.0, -5.0).is_err());
        assert!(scale_factor(10.0, f64::NAN).is_err());
    }

    #[test]
    fn test_scale_caption_format() {
        assert_eq!(scale_caption(0.01), "Scale: 1 px = 0.0100 m");
        assert_eq!(scale_caption(0.123456), "Scale: 1 px = 0.1235 m");
    }
}
