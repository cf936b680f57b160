use anyhow::Context;

/// Decoded raster held in premultiplied RGBA8.
///
/// Premultiplied storage lets crops and resamples run directly on paint-ready data
/// without dark fringes around transparent edges.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedImage {
    /// Pixel data, row-major premultiplied RGBA8.
    pub pixels: image::RgbaImage,
}

impl PreparedImage {
    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Wrap straight-alpha pixels, premultiplying them.
    pub fn from_straight(pixels: image::RgbaImage) -> Self {
        let (width, height) = pixels.dimensions();
        let mut raw = pixels.into_raw();
        premultiply_rgba8_in_place(&mut raw);
        Self {
            pixels: image::RgbaImage::from_raw(width, height, raw)
                .unwrap_or_else(|| image::RgbaImage::new(width, height)),
        }
    }
}

/// Decode encoded image bytes (PNG, JPEG, WebP, ...) into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> anyhow::Result<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        anyhow::bail!("decoded image has zero area");
    }
    Ok(PreparedImage::from_straight(rgba))
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
