use std::collections::BTreeMap;

use crate::{
    assets::store::{AssetLoader, normalize_rel_path},
    foundation::error::{CardError, CardResult},
};

/// One font file, loaded once and shared read-only across requests.
#[derive(Clone)]
pub struct LoadedFont {
    /// Bytes as handed to the shaper.
    pub(crate) blob: parley::fontique::Blob<u8>,
    /// Same bytes wrapped for the rasterizer.
    pub(crate) render: vello_cpu::peniko::FontData,
    /// Primary family name declared by the font.
    pub family: String,
    /// Weight of the face, used to select it among same-family siblings.
    pub(crate) weight: parley::style::FontWeight,
    /// Upright or italic, used the same way as `weight`.
    pub(crate) style: parley::style::FontStyle,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("bytes_len", &self.blob.data().len())
            .field("family", &self.family)
            .finish()
    }
}

/// Memoized font files keyed by their normalized asset path.
///
/// Built once at startup; immutable afterwards, so it can be shared behind an `Arc`.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    fonts: BTreeMap<String, LoadedFont>,
}

impl FontBook {
    /// Load every distinct font in `sources`. Any missing or unusable file fails the whole load.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn load<'a>(
        loader: &AssetLoader,
        sources: impl IntoIterator<Item = &'a str>,
    ) -> CardResult<Self> {
        let mut fonts = BTreeMap::new();
        for source in sources {
            let key = normalize_rel_path(source)?;
            if fonts.contains_key(&key) {
                continue;
            }
            let bytes = loader.read_bytes(&key)?;
            let font = Self::prepare(&key, bytes)?;
            tracing::debug!(font = %key, family = %font.family, "font loaded");
            fonts.insert(key, font);
        }
        Ok(Self { fonts })
    }

    /// Register raw font bytes under `source` without touching the filesystem.
    pub fn insert_bytes(&mut self, source: &str, bytes: Vec<u8>) -> CardResult<()> {
        let key = normalize_rel_path(source)?;
        let font = Self::prepare(&key, bytes)?;
        self.fonts.insert(key, font);
        Ok(())
    }

    /// Lookup a loaded font by asset path.
    pub fn get(&self, source: &str) -> CardResult<&LoadedFont> {
        let key = normalize_rel_path(source)?;
        self.fonts
            .get(&key)
            .ok_or_else(|| CardError::asset_load(format!("font '{key}' was not loaded")))
    }

    /// Iterate `(asset path, font)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LoadedFont)> {
        self.fonts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// True when no fonts are loaded.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    fn prepare(key: &str, bytes: Vec<u8>) -> CardResult<LoadedFont> {
        let blob = parley::fontique::Blob::from(bytes.clone());

        let mut scratch = parley::FontContext::default();
        let families = scratch.collection.register_fonts(blob.clone(), None);
        let (family_id, faces) = families.first().ok_or_else(|| {
            CardError::asset_load(format!("font '{key}' contains no usable font families"))
        })?;
        let face = faces.first().ok_or_else(|| {
            CardError::asset_load(format!("font '{key}' contains no faces"))
        })?;
        let (weight, style) = (face.weight(), face.style());
        let family = scratch
            .collection
            .family_name(*family_id)
            .ok_or_else(|| CardError::asset_load(format!("font '{key}' family has no name")))?
            .to_string();

        let render = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        Ok(LoadedFont {
            blob,
            render,
            family,
            weight,
            style,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
