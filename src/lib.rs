//! maskblend is an alpha-mask compositing pass for RGBA images.
//!
//! A pass takes a base image, a same-sized mask image and a [`CompositeParams`]
//! record and produces one premultiplied RGBA image. Every output pixel is computed
//! independently:
//!
//! 1. **Sample** the mask alpha at the pixel (one tap, or a five-tap cross in
//!    [`Preset::Quality`]).
//! 2. **Shape** the raw intensity into opacity: contrast/brightness, then a
//!    smoothstep around `threshold`.
//! 3. **Suppress spill**: desaturate base colors whose hue is near `spill_color`.
//! 4. **Blend** (Normal, Multiply, Screen, Overlay), mix by opacity and premultiply.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure per pixel**: no pixel reads another pixel's output, so passes split
//!   freely across threads ([`composite_with`] + [`Threading`]) with identical results.
//! - **Clamp, don't reject**: out-of-range parameters are clamped where they are used;
//!   only non-finite numbers and mismatched image sizes are errors.
//! - **Premultiplied output**: `rgb <= a` for every output texel.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod color;
mod foundation;
mod pipeline;
mod stages;
mod surface;

pub use color::hsv::{HSV_EPSILON, Hsv, hsv_to_rgb, hue_distance, rgb_to_hsv};
pub use foundation::core::{Rgb, Rgba};
pub use foundation::error::{MaskblendError, MaskblendResult};
pub use pipeline::driver::{Threading, composite, composite_pixel, composite_texel, composite_with};
pub use pipeline::params::{CompositeParams, OverlaySource, Preset};
pub use stages::blend::{BlendMode, blend_and_premultiply, blend_channel, blend_rgb, mix_blend};
pub use stages::sampler::{
    CENTER_WEIGHT, MaskTaps, NEIGHBOR_WEIGHT, sample_mask, sample_mask_at_pixel,
};
pub use stages::shaper::{
    FAST_EDGE_WIDTH, MIN_EDGE_SMOOTHING, ShaperParams, adjust_contrast_brightness, shape_alpha,
    shape_alpha_fast,
};
pub use stages::spill::{SPILL_HUE_WINDOW, suppress_spill};
pub use surface::buffer::ImageRgba32F;
pub use surface::io::{AlphaExport, load_image, save_png};
