use std::time::Instant;

use rayon::prelude::*;

use crate::{
    foundation::core::{Rgb, Rgba},
    foundation::error::{MaskblendError, MaskblendResult},
    foundation::math::saturate,
    pipeline::params::{CompositeParams, OverlaySource, Preset},
    stages::{
        blend::blend_and_premultiply,
        sampler::sample_mask_at_pixel,
        shaper::{shape_alpha, shape_alpha_fast},
        spill::suppress_spill,
    },
    surface::buffer::ImageRgba32F,
};

/// How a pass is spread across threads.
///
/// The output does not depend on these settings.
#[derive(Clone, Debug, Default)]
pub struct Threading {
    /// Split the output into rows and process them on a rayon pool.
    pub parallel: bool,
    /// Pool size; `None` lets rayon decide. Must be >= 1 when set.
    pub threads: Option<usize>,
}

impl Threading {
    /// Parallel execution with an optional explicit thread count.
    pub fn parallel(threads: Option<usize>) -> Self {
        Self {
            parallel: true,
            threads,
        }
    }
}

/// Per-pixel kernel once the mask has been sampled.
///
/// Runs alpha shaping, spill suppression (when enabled by the preset and
/// `spill_suppression > 0`) and blending, and returns a premultiplied texel whose
/// alpha is the shaped opacity. The base texel's own alpha is not used.
///
/// Color channels and the mask value are clamped to `[0, 1]` first (NaN becomes 0),
/// so the output always satisfies `rgb <= a`.
pub fn composite_texel(
    base: Rgba,
    mask_value: f32,
    mask_rgb: Rgb,
    params: &CompositeParams,
    preset: Preset,
) -> Rgba {
    let full = preset.uses_adjustments();
    let mask_value = saturate(mask_value);
    let base_rgb = base.rgb().map(saturate);
    let mask_rgb = mask_rgb.map(saturate);

    let alpha = if full {
        shape_alpha(mask_value, &params.shaper())
    } else {
        shape_alpha_fast(mask_value, params.threshold)
    };

    let color = if full && params.spill_suppression > 0.0 {
        suppress_spill(base_rgb, params.spill_color, params.spill_suppression)
    } else {
        base_rgb
    };

    let overlay = match params.overlay_source {
        OverlaySource::Base => color,
        OverlaySource::Mask => mask_rgb,
    };

    blend_and_premultiply(color, overlay, alpha, params.blend_mode)
}

/// Full pipeline for pixel `(x, y)`: sample the mask at the pixel center, then
/// [`composite_texel`]. Both images are assumed to share dimensions.
pub fn composite_pixel(
    base: &ImageRgba32F,
    mask: &ImageRgba32F,
    x: u32,
    y: u32,
    params: &CompositeParams,
    preset: Preset,
) -> Rgba {
    let (ix, iy) = (i64::from(x), i64::from(y));
    let mask_value = sample_mask_at_pixel(mask, x, y, preset.taps());
    let mask_rgb = mask.texel(ix, iy).rgb();
    composite_texel(base.texel(ix, iy), mask_value, mask_rgb, params, preset)
}

/// Composite `base` through `mask` on the calling thread.
///
/// Fails with [`MaskblendError::InvalidInput`] when the images differ in size and
/// [`MaskblendError::Validation`] when a parameter is not finite.
pub fn composite(
    base: &ImageRgba32F,
    mask: &ImageRgba32F,
    params: &CompositeParams,
    preset: Preset,
) -> MaskblendResult<ImageRgba32F> {
    composite_with(base, mask, params, preset, &Threading::default())
}

/// Composite `base` through `mask`, optionally row-parallel.
///
/// Produces bit-identical output for every [`Threading`] configuration.
#[tracing::instrument(skip(base, mask, params))]
pub fn composite_with(
    base: &ImageRgba32F,
    mask: &ImageRgba32F,
    params: &CompositeParams,
    preset: Preset,
    threading: &Threading,
) -> MaskblendResult<ImageRgba32F> {
    if !base.same_dimensions(mask) {
        let (bw, bh) = base.dimensions();
        let (mw, mh) = mask.dimensions();
        return Err(MaskblendError::invalid_input(format!(
            "base image is {bw}x{bh} but mask is {mw}x{mh}"
        )));
    }
    params.validate()?;

    let started = Instant::now();
    let (width, height) = base.dimensions();

    let out = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        let mut texels = vec![Rgba::TRANSPARENT; base.texels().len()];
        pool.install(|| {
            texels
                .par_chunks_mut(width as usize)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, out) in row.iter_mut().enumerate() {
                        *out = composite_pixel(base, mask, x as u32, y as u32, params, preset);
                    }
                });
        });
        ImageRgba32F::from_texels(width, height, texels)?
    } else {
        ImageRgba32F::from_fn(width, height, |x, y| {
            composite_pixel(base, mask, x, y, params, preset)
        })?
    };

    tracing::debug!(
        width,
        height,
        %preset,
        parallel = threading.parallel,
        elapsed_us = started.elapsed().as_micros() as u64,
        "composite pass finished"
    );
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> MaskblendResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(MaskblendError::validation(
            "threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        MaskblendError::Other(anyhow::Error::new(e).context("failed to build rayon thread pool"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/driver.rs"]
mod tests;
