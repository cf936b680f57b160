use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::decode::{PreparedImage, decode_image},
    foundation::error::{CardError, CardResult},
};

/// Reads template assets relative to a fixed root directory.
///
/// Every call goes to disk: template rasters are request-scoped and never cached here.
#[derive(Clone, Debug)]
pub struct AssetLoader {
    root: PathBuf,
}

impl AssetLoader {
    /// Build a loader rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used when resolving relative asset paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative asset path against the root.
    pub fn resolve(&self, source: &str) -> CardResult<PathBuf> {
        let norm = normalize_rel_path(source)?;
        Ok(self.root.join(Path::new(&norm)))
    }

    /// Read raw bytes of an asset. Missing files are [`CardError::AssetLoad`].
    pub fn read_bytes(&self, source: &str) -> CardResult<Vec<u8>> {
        let path = self.resolve(source)?;
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(CardError::asset_load_from)
    }

    /// Read and decode a template raster. Corrupt files are [`CardError::AssetLoad`].
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn load_image(&self, source: &str) -> CardResult<PreparedImage> {
        let bytes = self.read_bytes(source)?;
        let image = decode_image(&bytes)
            .with_context(|| format!("decode template asset '{source}'"))
            .map_err(CardError::asset_load_from)?;
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            "template asset decoded"
        );
        Ok(image)
    }
}

/// Normalize and validate root-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> CardResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(CardError::validation(format!(
            "asset path '{source}' must be relative"
        )));
    }
    if s.is_empty() {
        return Err(CardError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(CardError::validation(format!(
                "asset path '{source}' must not contain '..'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(CardError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
