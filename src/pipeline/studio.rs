use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use rayon::prelude::*;

use crate::{
    assets::{fonts::FontBook, store::AssetLoader},
    card::request::{CardRequest, CardVariant, RenderedCard},
    card::spec::StudioConfig,
    foundation::error::{CardError, CardResult},
    pipeline::{gradient::render_gradient_card, title::render_title_card},
    render::encode::{next_card_path, write_png_atomic},
};

/// Long-lived card generator.
///
/// Holds the validated configuration and the font book, which is loaded once and shared
/// read-only by every request. Everything else (images, shaping contexts, layout state) is
/// created per request, so a `CardStudio` can serve requests from many threads at once.
#[derive(Clone, Debug)]
pub struct CardStudio {
    config: StudioConfig,
    loader: AssetLoader,
    fonts: Arc<FontBook>,
}

impl CardStudio {
    /// Validate `config` and load every font it references.
    #[tracing::instrument(skip(config), fields(assets_root = %config.assets_root.display()))]
    pub fn open(config: StudioConfig) -> CardResult<Self> {
        config.validate()?;
        let loader = AssetLoader::new(config.assets_root.clone());
        let fonts = FontBook::load(&loader, config.font_sources())?;
        tracing::info!(fonts = fonts.len(), "card studio ready");
        Ok(Self {
            config,
            loader,
            fonts: Arc::new(fonts),
        })
    }

    /// Build a studio around an already loaded font book.
    pub fn with_fonts(config: StudioConfig, fonts: Arc<FontBook>) -> CardResult<Self> {
        config.validate()?;
        let loader = AssetLoader::new(config.assets_root.clone());
        Ok(Self {
            config,
            loader,
            fonts,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    /// Shared font book.
    pub fn fonts(&self) -> &Arc<FontBook> {
        &self.fonts
    }

    /// Render one card.
    #[tracing::instrument(skip(self, request), fields(variant = ?request.variant))]
    pub fn generate(&self, request: &CardRequest) -> CardResult<RenderedCard> {
        let card = match request.variant {
            CardVariant::Gradient => render_gradient_card(
                &self.config.gradient,
                &self.loader,
                &self.fonts,
                request.photo.as_deref(),
                &request.template,
                &request.caption,
            )?,
            CardVariant::Title => render_title_card(
                &self.config.title,
                &self.loader,
                &self.fonts,
                &request.template,
            )?,
        };
        tracing::info!(
            width = card.width,
            height = card.height,
            bytes = card.png.len(),
            "card generated"
        );
        Ok(card)
    }

    /// Render independent requests in parallel. Results keep the order of `requests`.
    ///
    /// `threads` caps the worker count; `None` uses rayon's default.
    pub fn generate_batch(
        &self,
        requests: &[CardRequest],
        threads: Option<usize>,
    ) -> CardResult<Vec<CardResult<RenderedCard>>> {
        let pool = build_thread_pool(threads)?;
        Ok(pool.install(|| {
            requests
                .par_iter()
                .map(|request| self.generate(request))
                .collect::<Vec<_>>()
        }))
    }

    /// Render one card and store it as `dir/card_<unix-millis>.png`.
    pub fn generate_to_dir(&self, request: &CardRequest, dir: &Path) -> CardResult<PathBuf> {
        let card = self.generate(request)?;
        let path = next_card_path(dir);
        write_png_atomic(&path, &card.png)?;
        Ok(path)
    }
}

fn build_thread_pool(threads: Option<usize>) -> CardResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CardError::validation("batch 'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CardError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/studio.rs"]
mod tests;
