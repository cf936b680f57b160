use std::{
    io::Cursor,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context;

use crate::{
    assets::decode::unpremultiply_rgba8_in_place,
    foundation::error::{CardError, CardResult},
    render::canvas::FrameRGBA,
};

/// Encode a premultiplied frame as a straight-alpha PNG.
pub fn encode_png(frame: &FrameRGBA) -> CardResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(CardError::encode(format!(
            "frame byte length {} does not match {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut straight = frame.data.clone();
    unpremultiply_rgba8_in_place(&mut straight);
    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight)
        .ok_or_else(|| CardError::encode("frame buffer rejected by encoder"))?;

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .context("encode png")
        .map_err(CardError::encode_from)?;
    Ok(png)
}

/// Write `png` to `path` through a sibling temp file so readers never observe a partial file.
#[tracing::instrument(skip(png), fields(bytes = png.len()))]
pub fn write_png_atomic(path: &Path, png: &[u8]) -> CardResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))
            .map_err(CardError::encode_from)?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| CardError::encode(format!("'{}' has no file name", path.display())))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(format!(
        ".{}-{}.tmp",
        std::process::id(),
        NEXT_SEQ.fetch_add(1, Ordering::Relaxed)
    ));
    let tmp = path.with_file_name(tmp_name);

    std::fs::write(&tmp, png)
        .with_context(|| format!("write temp png '{}'", tmp.display()))
        .map_err(CardError::encode_from)?;
    if let Err(err) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(CardError::encode(format!(
            "move '{}' into place: {err}",
            path.display()
        )));
    }
    tracing::debug!(path = %path.display(), "wrote card");
    Ok(())
}

/// Process-wide sequence shared by output and temp names.
static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Fresh output path `dir/card_<unix-millis>_<seq>.png`.
///
/// `seq` grows with every call in this process, so calls within one millisecond never collide.
pub fn next_card_path(dir: &Path) -> PathBuf {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let seq = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
    dir.join(format!("card_{millis}_{seq}.png"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/encode.rs"]
mod tests;
