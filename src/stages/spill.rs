//! Hue-selective desaturation for removing screen-color bleed.

use crate::{
    color::hsv::{hsv_to_rgb, hue_distance, rgb_to_hsv},
    foundation::core::Rgb,
    foundation::math::{finite_or, lerp, saturate},
};

/// Hue distance at which suppression fades to zero (one sixth of the wheel).
pub const SPILL_HUE_WINDOW: f32 = 1.0 / 6.0;

/// Desaturate `color` in proportion to how close its hue is to `spill`'s hue.
///
/// `strength` is clamped to `[0, 1]`; zero returns `color` untouched. Colors more
/// than [`SPILL_HUE_WINDOW`] away in hue are unaffected.
pub fn suppress_spill(color: Rgb, spill: Rgb, strength: f32) -> Rgb {
    let k = saturate(finite_or(strength, 0.0));
    if k <= 0.0 {
        return color;
    }

    let hsv = rgb_to_hsv(color);
    let spill_hue = rgb_to_hsv(spill).h;

    let d = hue_distance(hsv.h, spill_hue);
    let amount = saturate(1.0 - d / SPILL_HUE_WINDOW);
    if amount <= 0.0 {
        return color;
    }

    let mut out = hsv;
    out.s = hsv.s * lerp(1.0, 0.0, amount * k);
    hsv_to_rgb(out)
}

#[cfg(test)]
#[path = "../../tests/unit/stages/spill.rs"]
mod tests;
