use serde::{Deserialize, Serialize};

use crate::constants::FULL_TURN_DEGREES;

/// Result category produced by a completed spin.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WheelValue {
    Text,
    Picture,
    #[default]
    None,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const SKY_BLUE: Color = Color::rgb(0, 191, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS color string, e.g. `rgb(255, 165, 0)`.
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// One wedge of the wheel.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub index: usize,
    pub color: Color,
    pub value: WheelValue,
}

/// The seven wedges in drawing order, clockwise from the start angle.
pub fn default_segments() -> Vec<Segment> {
    [
        (Color::RED, WheelValue::Text),
        (Color::ORANGE, WheelValue::Picture),
        (Color::YELLOW, WheelValue::Text),
        (Color::GREEN, WheelValue::Picture),
        (Color::SKY_BLUE, WheelValue::Text),
        (Color::BLUE, WheelValue::Picture),
        (Color::MAGENTA, WheelValue::Text),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (color, value))| Segment { index, color, value })
    .collect()
}

/// Fraction of a segment treated as "on the boundary". Covers f32 rounding of
/// `i * 360 / n` and nothing wider.
const BOUNDARY_EPSILON: f64 = 1e-6;

pub fn sweep_angle(segment_count: usize) -> f32 {
    FULL_TURN_DEGREES / segment_count as f32
}

/// Reduces any angle into `[0, 360)`.
pub fn normalize_angle(angle: f32) -> f32 {
    let normalized = angle.rem_euclid(FULL_TURN_DEGREES);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if normalized >= FULL_TURN_DEGREES {
        0.0
    } else {
        normalized
    }
}

/// Index of the segment under `angle`. Truncates, so a boundary angle belongs
/// to the segment that starts there.
pub fn segment_index(angle: f32, segment_count: usize) -> usize {
    if segment_count == 0 || !angle.is_finite() {
        return 0;
    }
    let ratio = normalize_angle(angle) as f64 / (FULL_TURN_DEGREES as f64 / segment_count as f64);
    let nearest = ratio.round();
    // f32 rounding can leave an exact boundary a hair below the integer
    let index = if (ratio - nearest).abs() < BOUNDARY_EPSILON {
        nearest
    } else {
        ratio.trunc()
    } as usize;
    // 359.99.. can still snap up to `segment_count`
    index % segment_count
}

/// Maps a rotation angle to the segment it lands on.
///
/// Returns `None` only for an empty segment table.
pub fn map_angle(angle: f32, segments: &[Segment]) -> Option<&Segment> {
    if segments.is_empty() {
        return None;
    }
    segments.get(segment_index(angle, segments.len()))
}
