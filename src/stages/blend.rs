//! Blend modes and the final opacity/premultiply step.

use std::{fmt, str::FromStr};

use crate::{
    foundation::core::{Rgb, Rgba},
    foundation::error::MaskblendError,
    foundation::math::saturate,
};

/// Per-channel formula combining a base layer `B` with an overlay `O`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// `O`.
    #[default]
    Normal,
    /// `B * O`.
    Multiply,
    /// `1 - (1 - B) * (1 - O)`.
    Screen,
    /// `2BO` where `B < 0.5`, else `1 - 2(1 - B)(1 - O)`.
    Overlay,
}

impl BlendMode {
    /// All modes in declaration order.
    pub const ALL: [BlendMode; 4] = [
        BlendMode::Normal,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
    ];

    /// Lowercase name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlendMode {
    type Err = MaskblendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        BlendMode::ALL
            .into_iter()
            .find(|m| m.as_str() == key)
            .ok_or_else(|| MaskblendError::validation(format!("unknown blend mode '{s}'")))
    }
}

/// Blend a single channel.
pub fn blend_channel(mode: BlendMode, b: f32, o: f32) -> f32 {
    match mode {
        BlendMode::Normal => o,
        BlendMode::Multiply => b * o,
        BlendMode::Screen => 1.0 - (1.0 - b) * (1.0 - o),
        BlendMode::Overlay => {
            if b < 0.5 {
                2.0 * b * o
            } else {
                1.0 - 2.0 * (1.0 - b) * (1.0 - o)
            }
        }
    }
}

/// Blend every color channel of `base` with `overlay`.
pub fn blend_rgb(mode: BlendMode, base: Rgb, overlay: Rgb) -> Rgb {
    base.zip_map(overlay, |b, o| blend_channel(mode, b, o))
}

/// Mix the blend result over `base` by `alpha`, then premultiply by `alpha`.
///
/// Opacity is applied twice: once as the mix factor and once as coverage. With
/// `alpha = 1` the output is exactly the blend result.
pub fn blend_and_premultiply(base: Rgb, overlay: Rgb, alpha: f32, mode: BlendMode) -> Rgba {
    let a = saturate(alpha);
    let mixed = mix_blend(base, overlay, a, mode);
    mixed.with_alpha(a).premultiplied()
}

/// `lerp(base, blend(base, overlay), alpha)` before premultiplication.
pub fn mix_blend(base: Rgb, overlay: Rgb, alpha: f32, mode: BlendMode) -> Rgb {
    base.lerp(blend_rgb(mode, base, overlay), alpha)
}

#[cfg(test)]
#[path = "../../tests/unit/stages/blend.rs"]
mod tests;
