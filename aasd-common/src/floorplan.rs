//! Floor-plan SVG rendering
//!
//! Draws the room outline, a dashed meter grid, one translucent coverage
//! circle per speaker, the speaker dots and their "SPK" labels. The y axis
//! points up (origin at the bottom-left corner), with equal scale on both
//! axes.

use svg::node::element::{Circle, ClipPath, Definitions, Group, Line, Rectangle, Text};
use svg::Document;

use crate::layout::SpeakerPosition;
use crate::room::RoomSpec;

/// Maximum drawing area for the room itself, in pixels
const PLOT_MAX_WIDTH: f64 = 720.0;
const PLOT_MAX_HEIGHT: f64 = 480.0;

const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

/// Offset of the "SPK" label from its speaker, in meters
const LABEL_OFFSET_M: f64 = 0.2;

const ROOM_CLIP_ID: &str = "room-clip";
const GRID_STROKE: &str = "#999";
const TICK_FILL: &str = "#555";

/// Grid step in meters for a room whose larger side is `extent_m`
fn grid_step(extent_m: f64) -> f64 {
    if extent_m <= 20.0 {
        1.0
    } else if extent_m <= 50.0 {
        5.0
    } else {
        10.0
    }
}

/// Round pixel coordinates to two decimals to keep the markup compact
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Meter to pixel mapping for one rendered plan
#[derive(Debug, Clone, Copy)]
struct PlotFrame {
    px_per_m: f64,
    length_m: f64,
}

impl PlotFrame {
    fn px_x(&self, x_m: f64) -> f64 {
        round2(MARGIN_LEFT + x_m * self.px_per_m)
    }

    fn px_y(&self, y_m: f64) -> f64 {
        round2(MARGIN_TOP + (self.length_m - y_m) * self.px_per_m)
    }

    fn px_len(&self, meters: f64) -> f64 {
        round2(meters * self.px_per_m)
    }
}

/// Render the speaker layout as a standalone SVG document
///
/// `coverage_radius_m` only sizes the drawn circles.
pub fn render_layout_svg(
    room: &RoomSpec,
    positions: &[SpeakerPosition],
    coverage_radius_m: f64,
) -> String {
    let width_m = room.width_m();
    let length_m = room.length_m();
    let frame = PlotFrame {
        px_per_m: (PLOT_MAX_WIDTH / width_m).min(PLOT_MAX_HEIGHT / length_m),
        length_m,
    };

    let plot_w = frame.px_len(width_m);
    let plot_h = frame.px_len(length_m);
    let svg_w = round2(MARGIN_LEFT + plot_w + MARGIN_RIGHT);
    let svg_h = round2(MARGIN_TOP + plot_h + MARGIN_BOTTOM);

    let room_rect = || {
        Rectangle::new()
            .set("x", MARGIN_LEFT)
            .set("y", MARGIN_TOP)
            .set("width", plot_w)
            .set("height", plot_h)
    };

    let defs = Definitions::new().add(ClipPath::new().set("id", ROOM_CLIP_ID).add(room_rect()));

    let mut document = Document::new()
        .set("width", svg_w.round())
        .set("height", svg_h.round())
        .set("viewBox", format!("0 0 {} {}", svg_w, svg_h))
        .set("font-family", "sans-serif")
        .add(defs)
        .add(
            Rectangle::new()
                .set("width", "100%")
                .set("height", "100%")
                .set("fill", "#ffffff"),
        )
        .add(
            Text::new("Speaker Layout")
                .set("x", round2(MARGIN_LEFT + plot_w / 2.0))
                .set("y", 24)
                .set("text-anchor", "middle")
                .set("font-size", 16),
        )
        .add(
            room_rect()
                .set("fill", "whitesmoke")
                .set("stroke", "black")
                .set("stroke-width", 1),
        )
        .add(grid(&frame, width_m, length_m));

    let coverage = positions.iter().fold(
        Group::new().set("clip-path", format!("url(#{})", ROOM_CLIP_ID)),
        |group, p| {
            group.add(
                Circle::new()
                    .set("cx", frame.px_x(p.x))
                    .set("cy", frame.px_y(p.y))
                    .set("r", frame.px_len(coverage_radius_m))
                    .set("fill", "lightblue")
                    .set("fill-opacity", 0.2),
            )
        },
    );
    document = document.add(coverage);

    for p in positions {
        document = document
            .add(
                Circle::new()
                    .set("cx", frame.px_x(p.x))
                    .set("cy", frame.px_y(p.y))
                    .set("r", 4)
                    .set("fill", "red"),
            )
            .add(
                Text::new("SPK")
                    .set("x", frame.px_x(p.x + LABEL_OFFSET_M))
                    .set("y", frame.px_y(p.y + LABEL_OFFSET_M))
                    .set("font-size", 10),
            );
    }

    let mid_y = round2(MARGIN_TOP + plot_h / 2.0);
    document = document
        .add(
            Text::new("Width (m)")
                .set("x", round2(MARGIN_LEFT + plot_w / 2.0))
                .set("y", round2(svg_h - 10.0))
                .set("text-anchor", "middle")
                .set("font-size", 12),
        )
        .add(
            Text::new("Length (m)")
                .set("x", 16)
                .set("y", mid_y)
                .set("text-anchor", "middle")
                .set("font-size", 12)
                .set("transform", format!("rotate(-90 16 {})", mid_y)),
        );

    document.to_string()
}

/// Dashed grid lines with tick labels on both axes
fn grid(frame: &PlotFrame, width_m: f64, length_m: f64) -> Group {
    let step = grid_step(width_m.max(length_m));
    let top = frame.px_y(length_m);
    let bottom = frame.px_y(0.0);
    let left = frame.px_x(0.0);
    let right = frame.px_x(width_m);

    let dashed = |x1: f64, y1: f64, x2: f64, y2: f64| {
        Line::new()
            .set("x1", x1)
            .set("y1", y1)
            .set("x2", x2)
            .set("y2", y2)
            .set("stroke", GRID_STROKE)
            .set("stroke-opacity", 0.5)
            .set("stroke-dasharray", "4,4")
    };
    let tick = |label: f64, x: f64, y: f64, anchor: &str| {
        Text::new(label.to_string())
            .set("x", x)
            .set("y", y)
            .set("text-anchor", anchor)
            .set("font-size", 9)
            .set("fill", TICK_FILL)
    };

    let mut group = Group::new().set("class", "grid");

    let mut i = 0u32;
    loop {
        let x_m = f64::from(i) * step;
        if x_m > width_m {
            break;
        }
        let x = frame.px_x(x_m);
        group = group
            .add(dashed(x, top, x, bottom))
            .add(tick(x_m, x, round2(bottom + 14.0), "middle"));
        i += 1;
    }

    let mut j = 0u32;
    loop {
        let y_m = f64::from(j) * step;
        if y_m > length_m {
            break;
        }
        let y = frame.px_y(y_m);
        group = group
            .add(dashed(left, y, right, y))
            .add(tick(y_m, round2(left - 6.0), round2(y + 3.0), "end"));
        j += 1;
    }

    group
}
