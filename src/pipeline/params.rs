use std::{fmt, path::Path, str::FromStr};

use anyhow::Context as _;

use crate::{
    foundation::core::Rgb,
    foundation::error::{MaskblendError, MaskblendResult},
    stages::blend::BlendMode,
    stages::sampler::MaskTaps,
    stages::shaper::ShaperParams,
};

/// Which color the blend mode combines with the base color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlaySource {
    /// The base color after spill suppression.
    #[default]
    Base,
    /// The mask texel's RGB.
    Mask,
}

/// Configuration for one compositing pass.
///
/// Every field has a default, so a JSON document only needs to name what it changes.
/// Numeric fields are never range-checked: they are clamped where the pipeline uses them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositeParams {
    /// Mask level at which opacity crosses 0.5.
    pub threshold: f32,
    /// Half-width of the opacity transition around `threshold`.
    pub edge_smoothing: f32,
    /// Contrast multiplier applied to the mask around mid-grey.
    pub contrast: f32,
    /// Offset added to the mask after contrast.
    pub brightness: f32,
    /// Formula combining base and overlay colors.
    pub blend_mode: BlendMode,
    /// Spill suppression strength, `[0, 1]`; zero disables the stage.
    pub spill_suppression: f32,
    /// Reference color whose hue is desaturated.
    pub spill_color: Rgb,
    /// Blend target.
    pub overlay_source: OverlaySource,
}

impl Default for CompositeParams {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            edge_smoothing: 0.1,
            contrast: 1.0,
            brightness: 0.0,
            blend_mode: BlendMode::Normal,
            spill_suppression: 0.0,
            spill_color: Rgb::GREEN,
            overlay_source: OverlaySource::Base,
        }
    }
}

impl CompositeParams {
    /// Reject values that cannot be clamped into meaning (NaN, infinities).
    pub fn validate(&self) -> MaskblendResult<()> {
        for (name, value) in [
            ("threshold", self.threshold),
            ("edge_smoothing", self.edge_smoothing),
            ("contrast", self.contrast),
            ("brightness", self.brightness),
            ("spill_suppression", self.spill_suppression),
            ("spill_color.r", self.spill_color.r),
            ("spill_color.g", self.spill_color.g),
            ("spill_color.b", self.spill_color.b),
        ] {
            if !value.is_finite() {
                return Err(MaskblendError::validation(format!("{name} must be finite")));
            }
        }
        Ok(())
    }

    /// The subset consumed by the alpha shaper.
    pub fn shaper(&self) -> ShaperParams {
        ShaperParams {
            threshold: self.threshold,
            edge_smoothing: self.edge_smoothing,
            contrast: self.contrast,
            brightness: self.brightness,
        }
    }

    /// Parse and validate a JSON parameter document.
    pub fn from_json_str(s: &str) -> MaskblendResult<Self> {
        let params: Self = serde_json::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    /// Read, parse and validate a JSON parameter file.
    pub fn from_json_file(path: &Path) -> MaskblendResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read params '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Pretty-printed JSON for this parameter set.
    pub fn to_json_pretty(&self) -> MaskblendResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Precision/performance trade-off for a pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Single tap, fixed ±0.02 edge, no contrast/brightness, no spill suppression.
    Fast,
    /// Single tap with the full shaper and spill suppression.
    #[default]
    Optimized,
    /// Five-tap mask sampling with the full shaper and spill suppression.
    Quality,
}

impl Preset {
    /// All presets, fastest first.
    pub const ALL: [Preset; 3] = [Preset::Fast, Preset::Optimized, Preset::Quality];

    /// Lowercase name used on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Preset::Fast => "fast",
            Preset::Optimized => "optimized",
            Preset::Quality => "quality",
        }
    }

    /// Mask sampler variant.
    pub fn taps(self) -> MaskTaps {
        match self {
            Preset::Quality => MaskTaps::FiveTap,
            Preset::Fast | Preset::Optimized => MaskTaps::Single,
        }
    }

    /// Whether contrast/brightness, configurable smoothing and spill suppression run.
    pub fn uses_adjustments(self) -> bool {
        !matches!(self, Preset::Fast)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = MaskblendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.as_str() == key)
            .ok_or_else(|| MaskblendError::validation(format!("unknown preset '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/params.rs"]
mod tests;
