//! Raw mask intensity -> final opacity.

use crate::foundation::math::{finite_or, saturate, smoothstep};

/// Lower bound for the smoothstep half-width; keeps the edge from collapsing to a hard step.
pub const MIN_EDGE_SMOOTHING: f32 = 0.001;

/// Fixed half-width used by the fast preset.
pub const FAST_EDGE_WIDTH: f32 = 0.02;

/// Inputs to [`shape_alpha`]. Values are used as given and clamped where they are consumed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShaperParams {
    /// Center of the opacity transition.
    pub threshold: f32,
    /// Half-width of the transition, floored to [`MIN_EDGE_SMOOTHING`].
    pub edge_smoothing: f32,
    /// Contrast multiplier around mid-grey.
    pub contrast: f32,
    /// Additive offset after contrast.
    pub brightness: f32,
}

impl Default for ShaperParams {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            edge_smoothing: 0.1,
            contrast: 1.0,
            brightness: 0.0,
        }
    }
}

/// `clamp((m - 0.5) * contrast + 0.5 + brightness, 0, 1)`.
pub fn adjust_contrast_brightness(m: f32, contrast: f32, brightness: f32) -> f32 {
    let contrast = finite_or(contrast, 1.0);
    let brightness = finite_or(brightness, 0.0);
    saturate((m - 0.5) * contrast + 0.5 + brightness)
}

/// Map mask intensity `m` to opacity: contrast/brightness, then a smoothstep
/// centered on the threshold with half-width `max(edge_smoothing, 0.001)`.
///
/// Non-decreasing in `m` for fixed parameters.
pub fn shape_alpha(m: f32, params: &ShaperParams) -> f32 {
    let m = adjust_contrast_brightness(m, params.contrast, params.brightness);
    let t = finite_or(params.threshold, 0.5);
    let s = finite_or(params.edge_smoothing, MIN_EDGE_SMOOTHING).max(MIN_EDGE_SMOOTHING);
    smoothstep(t - s, t + s, m)
}

/// Fast-preset shaper: no contrast/brightness, fixed ±[`FAST_EDGE_WIDTH`] window.
pub fn shape_alpha_fast(m: f32, threshold: f32) -> f32 {
    let t = finite_or(threshold, 0.5);
    smoothstep(t - FAST_EDGE_WIDTH, t + FAST_EDGE_WIDTH, m)
}

#[cfg(test)]
#[path = "../../tests/unit/stages/shaper.rs"]
mod tests;
