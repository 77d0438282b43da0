use std::path::Path;

use anyhow::Context as _;

use crate::{foundation::error::MaskblendResult, surface::buffer::ImageRgba32F};

/// How alpha is encoded when writing an output image to disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlphaExport {
    /// Write pipeline output as-is (rgb already scaled by alpha).
    #[default]
    Premultiplied,
    /// Divide rgb by alpha first, as most image viewers expect.
    Straight,
}

/// Decode any format supported by the `image` crate into straight-alpha RGBA.
pub fn load_image(path: &Path) -> MaskblendResult<ImageRgba32F> {
    let img = image::open(path)
        .with_context(|| format!("decode image '{}'", path.display()))?
        .to_rgba8();
    ImageRgba32F::from_rgba8(&img)
}

/// Encode `img` as an 8-bit PNG, creating parent directories as needed.
pub fn save_png(path: &Path, img: &ImageRgba32F, alpha: AlphaExport) -> MaskblendResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let rgba8 = match alpha {
        AlphaExport::Premultiplied => img.to_rgba8(),
        AlphaExport::Straight => img.unpremultiplied().to_rgba8(),
    };
    rgba8
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), ?alpha, "wrote png");
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/surface/io.rs"]
mod tests;
