//! Mask intensity lookup.
//!
//! The mask's alpha channel carries the raw intensity. The five-tap variant averages
//! the center with its four axis-aligned neighbours to soften stair-stepped edges.

use crate::{foundation::math::saturate, surface::buffer::ImageRgba32F};

/// Weight of the center tap in [`MaskTaps::FiveTap`].
pub const CENTER_WEIGHT: f32 = 0.4;
/// Weight of each cardinal neighbour in [`MaskTaps::FiveTap`].
pub const NEIGHBOR_WEIGHT: f32 = 0.15;

/// How many mask texels contribute to one sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskTaps {
    /// One bilinear lookup at the exact coordinate.
    #[default]
    Single,
    /// Center plus the four neighbours one texel away, weighted 0.4 / 4×0.15.
    FiveTap,
}

/// Sample mask intensity at normalized coordinates `(u, v)`.
///
/// Neighbour offsets for [`MaskTaps::FiveTap`] are one texel, i.e. `mask.texel_size()`.
/// Coordinates outside the image clamp to the edge.
pub fn sample_mask(mask: &ImageRgba32F, u: f32, v: f32, taps: MaskTaps) -> f32 {
    match taps {
        MaskTaps::Single => saturate(mask.sample_bilinear(u, v).a),
        MaskTaps::FiveTap => {
            let (du, dv) = mask.texel_size();
            let at = |u, v| saturate(mask.sample_bilinear(u, v).a);
            weigh_five(
                at(u, v),
                [at(u - du, v), at(u + du, v), at(u, v - dv), at(u, v + dv)],
            )
        }
    }
}

/// Sample mask intensity at the center of pixel `(x, y)`.
///
/// Equivalent to [`sample_mask`] at `((x+0.5)/w, (y+0.5)/h)` but addresses texels
/// directly, so center taps are exact regardless of image size.
pub fn sample_mask_at_pixel(mask: &ImageRgba32F, x: u32, y: u32, taps: MaskTaps) -> f32 {
    let (x, y) = (i64::from(x), i64::from(y));
    let at = |x, y| saturate(mask.texel(x, y).a);
    match taps {
        MaskTaps::Single => at(x, y),
        MaskTaps::FiveTap => weigh_five(
            at(x, y),
            [at(x - 1, y), at(x + 1, y), at(x, y - 1), at(x, y + 1)],
        ),
    }
}

fn weigh_five(center: f32, neighbors: [f32; 4]) -> f32 {
    let ring: f32 = neighbors.iter().sum();
    saturate(center * CENTER_WEIGHT + ring * NEIGHBOR_WEIGHT)
}

#[cfg(test)]
#[path = "../../tests/unit/stages/sampler.rs"]
mod tests;
