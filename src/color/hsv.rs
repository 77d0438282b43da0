//! RGB <-> HSV conversion on the unit hue circle.
//!
//! Hue, saturation and value all live in `[0, 1]`; hue `1.0` is the same angle as `0.0`.

use crate::foundation::core::Rgb;

/// Guards the chroma and value divisions when `max == min` or the color is black.
pub const HSV_EPSILON: f32 = 1.0e-10;

/// A color in hue/saturation/value form.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hsv {
    /// Hue as a fraction of a full turn, `[0, 1)`.
    pub h: f32,
    /// Saturation, `[0, 1]`.
    pub s: f32,
    /// Value (max channel), `[0, 1]`.
    pub v: f32,
}

impl Hsv {
    /// Build an HSV color from its components.
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }
}

/// Convert RGB to HSV.
///
/// Branch structure follows the usual max/min channel ordering; the epsilon keeps
/// grey and black inputs finite (hue 0, saturation 0).
pub fn rgb_to_hsv(c: Rgb) -> Hsv {
    // (max, mid-candidate, hue offset, other) after ordering g/b then r.
    let p = if c.g >= c.b {
        [c.g, c.b, 0.0, -1.0 / 3.0]
    } else {
        [c.b, c.g, -1.0, 2.0 / 3.0]
    };
    let q = if c.r >= p[0] {
        [c.r, p[1], p[2], p[0]]
    } else {
        [p[0], p[1], p[3], c.r]
    };

    let d = q[0] - q[3].min(q[1]);
    let h = (q[2] + (q[3] - q[1]) / (6.0 * d + HSV_EPSILON)).abs();
    let s = d / (q[0] + HSV_EPSILON);

    Hsv::new(wrap_hue(h), s, q[0])
}

/// Convert HSV back to RGB. Hue outside `[0, 1)` wraps.
pub fn hsv_to_rgb(c: Hsv) -> Rgb {
    let channel = |k: f32| {
        let p = ((c.h + k).rem_euclid(1.0) * 6.0 - 3.0).abs();
        let base = (p - 1.0).clamp(0.0, 1.0);
        c.v * (1.0 + (base - 1.0) * c.s)
    };
    Rgb::new(channel(1.0), channel(2.0 / 3.0), channel(1.0 / 3.0))
}

/// Shortest distance between two hues on the unit circle, in `[0, 0.5]`.
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (wrap_hue(a) - wrap_hue(b)).abs();
    if d > 0.5 { 1.0 - d } else { d }
}

fn wrap_hue(h: f32) -> f32 {
    let h = h.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negatives.
    if h >= 1.0 { 0.0 } else { h }
}

#[cfg(test)]
#[path = "../../tests/unit/color/hsv.rs"]
mod tests;
