use crate::{
    foundation::core::Rgba,
    foundation::error::{MaskblendError, MaskblendResult},
};

/// A `width × height` grid of floating-point RGBA texels stored row-major.
///
/// Lookups clamp to the edges; there is no wraparound.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageRgba32F {
    width: u32,
    height: u32,
    texels: Vec<Rgba>,
}

impl ImageRgba32F {
    /// Create an image filled with a single texel value.
    pub fn new(width: u32, height: u32, fill: Rgba) -> MaskblendResult<Self> {
        let len = texel_count(width, height)?;
        Ok(Self {
            width,
            height,
            texels: vec![fill; len],
        })
    }

    /// Wrap an existing row-major texel buffer.
    pub fn from_texels(width: u32, height: u32, texels: Vec<Rgba>) -> MaskblendResult<Self> {
        let len = texel_count(width, height)?;
        if texels.len() != len {
            return Err(MaskblendError::invalid_input(format!(
                "expected {len} texels for {width}x{height}, got {}",
                texels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Build an image by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> Rgba,
    ) -> MaskblendResult<Self> {
        let len = texel_count(width, height)?;
        let mut texels = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                texels.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Decode tightly packed RGBA8 bytes (`width * height * 4`).
    pub fn from_rgba8_bytes(width: u32, height: u32, bytes: &[u8]) -> MaskblendResult<Self> {
        let len = texel_count(width, height)?;
        let expected = len
            .checked_mul(4)
            .ok_or_else(|| MaskblendError::invalid_input("rgba8 buffer size overflow"))?;
        if bytes.len() != expected {
            return Err(MaskblendError::invalid_input(
                "from_rgba8_bytes expects a buffer matching width*height*4",
            ));
        }
        let texels = bytes
            .chunks_exact(4)
            .map(|px| Rgba::from_rgba8([px[0], px[1], px[2], px[3]]))
            .collect();
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Convert from an `image` crate RGBA8 buffer.
    pub fn from_rgba8(img: &image::RgbaImage) -> MaskblendResult<Self> {
        Self::from_rgba8_bytes(img.width(), img.height(), img.as_raw())
    }

    /// Quantize into an `image` crate RGBA8 buffer.
    pub fn to_rgba8(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(self.texels[self.index(x, y)].to_rgba8())
        })
    }

    /// Quantize into tightly packed RGBA8 bytes.
    pub fn to_rgba8_bytes(&self) -> Vec<u8> {
        self.texels.iter().flat_map(|t| t.to_rgba8()).collect()
    }

    /// Copy with every texel converted from premultiplied to straight alpha.
    pub fn unpremultiplied(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            texels: self.texels.iter().map(|t| t.unpremultiplied()).collect(),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when both images share width and height.
    pub fn same_dimensions(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Size of one texel in normalized coordinates: `(1/width, 1/height)`.
    pub fn texel_size(&self) -> (f32, f32) {
        (1.0 / self.width as f32, 1.0 / self.height as f32)
    }

    /// Row-major texel storage.
    pub fn texels(&self) -> &[Rgba] {
        &self.texels
    }

    /// Consume the image, returning its texels.
    pub fn into_texels(self) -> Vec<Rgba> {
        self.texels
    }

    /// Texel at integer coordinates, clamped to the nearest edge.
    pub fn texel(&self, x: i64, y: i64) -> Rgba {
        let x = x.clamp(0, i64::from(self.width) - 1) as u32;
        let y = y.clamp(0, i64::from(self.height) - 1) as u32;
        self.texels[self.index(x, y)]
    }

    /// Bilinear sample at normalized coordinates, where `(0,0)` is the top-left
    /// corner of the image and `(1,1)` the bottom-right corner.
    pub fn sample_bilinear(&self, u: f32, v: f32) -> Rgba {
        self.sample_bilinear_texel(u * self.width as f32, v * self.height as f32)
    }

    /// Bilinear sample in texel units; texel `i` has its center at `i + 0.5`.
    ///
    /// Sampling exactly at a texel center returns that texel unfiltered.
    pub fn sample_bilinear_texel(&self, tx: f32, ty: f32) -> Rgba {
        // Beyond one texel outside the image every tap clamps to the edge anyway.
        let x = if tx.is_finite() { tx - 0.5 } else { 0.0 };
        let y = if ty.is_finite() { ty - 0.5 } else { 0.0 };
        let x = x.clamp(-1.0, self.width as f32);
        let y = y.clamp(-1.0, self.height as f32);
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        let (ix, iy) = (x0 as i64, y0 as i64);

        let top = self.texel(ix, iy).lerp(self.texel(ix + 1, iy), fx);
        if fy == 0.0 {
            return top;
        }
        let bottom = self.texel(ix, iy + 1).lerp(self.texel(ix + 1, iy + 1), fx);
        top.lerp(bottom, fy)
    }

    pub(crate) fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

fn texel_count(width: u32, height: u32) -> MaskblendResult<usize> {
    if width == 0 || height == 0 {
        return Err(MaskblendError::invalid_input("image width/height must be > 0"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| MaskblendError::invalid_input("image size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/surface/buffer.rs"]
mod tests;
