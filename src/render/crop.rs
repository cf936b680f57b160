use image::imageops::{self, FilterType};

use crate::{
    assets::decode::PreparedImage,
    foundation::error::{CardError, CardResult},
};

/// Source rectangle (in source pixels) that covers a target box without letterboxing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// Center crop of a `src_w × src_h` image with the aspect ratio of `dst_w × dst_h`.
///
/// Only the overflowing axis is trimmed, equally on both sides.
pub fn cover_crop(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> CropRect {
    let (sw, sh) = (f64::from(src_w), f64::from(src_h));
    let target_aspect = f64::from(dst_w) / f64::from(dst_h.max(1));
    let src_aspect = sw / sh.max(1.0);

    if src_aspect > target_aspect {
        let width = sh * target_aspect;
        CropRect {
            x: (sw - width) / 2.0,
            y: 0.0,
            width,
            height: sh,
        }
    } else {
        let height = sw / target_aspect;
        CropRect {
            x: 0.0,
            y: (sh - height) / 2.0,
            width: sw,
            height,
        }
    }
}

/// Integer pixel version of [`cover_crop`]: `(x, y, width, height)`.
///
/// Odd trims put the extra pixel on the right/bottom edge.
pub fn cover_crop_px(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32, u32, u32) {
    let rect = cover_crop(src_w, src_h, dst_w, dst_h);
    let width = (rect.width.round() as u32).clamp(1, src_w.max(1));
    let height = (rect.height.round() as u32).clamp(1, src_h.max(1));
    ((src_w - width) / 2, (src_h - height) / 2, width, height)
}

/// Crop `img` to the target aspect ratio and scale it to exactly `dst_w × dst_h`.
pub fn crop_to_cover(img: &PreparedImage, dst_w: u32, dst_h: u32) -> CardResult<PreparedImage> {
    if dst_w == 0 || dst_h == 0 {
        return Err(CardError::validation("cover target must have non-zero area"));
    }
    let (x, y, w, h) = cover_crop_px(img.width(), img.height(), dst_w, dst_h);
    let cropped = imageops::crop_imm(&img.pixels, x, y, w, h).to_image();
    Ok(PreparedImage {
        pixels: imageops::resize(&cropped, dst_w, dst_h, FilterType::Triangle),
    })
}

/// Scale `img` to exactly `dst_w × dst_h`, ignoring aspect ratio.
pub fn resize_exact(img: &PreparedImage, dst_w: u32, dst_h: u32) -> CardResult<PreparedImage> {
    if dst_w == 0 || dst_h == 0 {
        return Err(CardError::validation("resize target must have non-zero area"));
    }
    if (img.width(), img.height()) == (dst_w, dst_h) {
        return Ok(img.clone());
    }
    Ok(PreparedImage {
        pixels: imageops::resize(&img.pixels, dst_w, dst_h, FilterType::Triangle),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/crop.rs"]
mod tests;
