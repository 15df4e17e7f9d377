//! Speaker grid placement
//!
//! Uniform grid fill: the first speaker sits half a spacing in from the
//! origin corner on both axes, the rest follow every `spacing` meters while
//! strictly inside the room. No acoustic modelling, no overlap
//! minimization, no clamping to the walls.

use serde::Serialize;
use tracing::debug;

use crate::room::RoomSpec;

/// One speaker location on the floor plan, in meters from the origin corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeakerPosition {
    pub x: f64,
    pub y: f64,
}

/// Generate speaker positions for `room`
///
/// Positions are emitted column by column: `x` is the outer loop and `y`
/// varies fastest. Both offsets start at `spacing / 2` and advance by
/// repeated addition of `spacing` while strictly below the room width
/// (resp. length).
///
/// # Examples
/// ```
/// use aasd_common::{generate_positions, RoomSpec};
///
/// let room = RoomSpec::new(12.0, 20.0, 6.0).unwrap();
/// let positions = generate_positions(&room);
/// assert_eq!(positions.len(), 6);
/// assert_eq!((positions[0].x, positions[0].y), (3.0, 3.0));
/// assert_eq!((positions[1].x, positions[1].y), (3.0, 9.0));
/// ```
pub fn generate_positions(room: &RoomSpec) -> Vec<SpeakerPosition> {
    let spacing = room.spacing_m();
    let start = spacing / 2.0;

    let mut positions = Vec::with_capacity(expected_position_count(room));

    let mut x = start;
    while x < room.width_m() {
        let mut y = start;
        while y < room.length_m() {
            positions.push(SpeakerPosition { x, y });
            y += spacing;
        }
        x += spacing;
    }

    debug!(
        "Generated {} speaker positions for {}m x {}m room at {}m spacing",
        positions.len(),
        room.width_m(),
        room.length_m(),
        spacing
    );

    positions
}

/// Closed-form number of positions [`generate_positions`] emits for `room`
///
/// `ceil((extent - spacing/2) / spacing)` per axis, zero when the extent does
/// not exceed half a spacing.
pub fn expected_position_count(room: &RoomSpec) -> usize {
    let per_axis = |extent: f64| -> usize {
        let half = room.spacing_m() / 2.0;
        if extent <= half {
            0
        } else {
            ((extent - half) / room.spacing_m()).ceil() as usize
        }
    };

    per_axis(room.width_m()) * per_axis(room.length_m())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(w: f64, l: f64, s: f64) -> RoomSpec {
        RoomSpec::new(w, l, s).unwrap()
    }

    #[test]
    fn test_reference_grid_12_by_20_spacing_6() {
        let positions = generate_positions(&room(12.0, 20.0, 6.0));
        let coords: Vec<(f64, f64)> = positions.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(
            coords,
            vec![
                (3.0, 3.0),
                (3.0, 9.0),
                (3.0, 15.0),
                (9.0, 3.0),
                (9.0, 9.0),
                (9.0, 15.0),
            ]
        );
    }

    #[test]
    fn test_room_smaller_than_half_spacing_is_empty() {
        assert!(generate_positions(&room(1.0, 20.0, 6.0)).is_empty());
        assert!(generate_positions(&room(12.0, 3.0, 6.0)).is_empty());
        assert_eq!(expected_position_count(&room(3.0, 3.0, 6.0)), 0);
    }

    #[test]
    fn test_loop_condition_is_strict() {
        // x = 3 equals the width: excluded
        let positions = generate_positions(&room(3.0, 10.0, 6.0));
        assert!(positions.is_empty());

        // Just above half a spacing: one column
        let positions = generate_positions(&room(3.5, 10.0, 6.0));
        assert_eq!(positions.len(), 2);
    }

    #[test]
    fn test_positions_within_bounds_and_evenly_spaced() {
        for &(w, l, s) in &[
            (12.0, 20.0, 6.0),
            (100.0, 100.0, 2.0),
            (7.0, 13.0, 3.0),
            (1.0, 1.0, 2.0),
            (55.0, 9.0, 10.0),
        ] {
            let r = room(w, l, s);
            let positions = generate_positions(&r);
            for p in &positions {
                assert!(p.x >= s / 2.0 && p.x < w, "x {} out of bounds for {:?}", p.x, r);
                assert!(p.y >= s / 2.0 && p.y < l, "y {} out of bounds for {:?}", p.y, r);
            }
            for pair in positions.windows(2) {
                if pair[0].x == pair[1].x {
                    assert!((pair[1].y - pair[0].y - s).abs() < 1e-9);
                } else {
                    assert!((pair[1].x - pair[0].x - s).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_count_matches_closed_form_across_form_range() {
        for w in 1..=100 {
            for s in 2..=10 {
                let r = room(w as f64, 37.0, s as f64);
                assert_eq!(
                    generate_positions(&r).len(),
                    expected_position_count(&r),
                    "mismatch for width {} spacing {}",
                    w,
                    s
                );
            }
        }
    }

    #[test]
    fn test_largest_form_room_stays_small() {
        let positions = generate_positions(&room(100.0, 100.0, 2.0));
        assert_eq!(positions.len(), 2500);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let r = room(31.0, 17.0, 4.0);
        assert_eq!(generate_positions(&r), generate_positions(&r));
    }
}
