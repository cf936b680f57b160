use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    assets::store::normalize_rel_path,
    foundation::core::{Point, Rgba8},
    foundation::error::{CardError, CardResult},
    layout::measure::LineHeights,
    markup::parser::StyleLevel,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A font file at a fixed pixel size.
pub struct TypeFace {
    /// Font path relative to the assets root.
    pub font: String,
    /// Font size in pixels.
    pub size_px: f32,
}

impl TypeFace {
    /// Build a face.
    pub fn new(font: impl Into<String>, size_px: f32) -> Self {
        Self {
            font: font.into(),
            size_px,
        }
    }

    fn validate(&self, what: &str) -> CardResult<()> {
        normalize_rel_path(&self.font)?;
        positive(self.size_px, &format!("{what}.size_px"))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Face plus the vertical advance used for each wrapped line.
pub struct StyleFont {
    /// Font path relative to the assets root.
    pub font: String,
    /// Font size in pixels.
    pub size_px: f32,
    /// Vertical advance per visual line in pixels.
    pub line_height_px: f32,
}

impl StyleFont {
    fn new(font: &str, size_px: f32, line_height_px: f32) -> Self {
        Self {
            font: font.to_string(),
            size_px,
            line_height_px,
        }
    }

    /// The face part of this style.
    pub fn face(&self) -> TypeFace {
        TypeFace::new(self.font.clone(), self.size_px)
    }

    fn validate(&self, what: &str) -> CardResult<()> {
        self.face().validate(what)?;
        positive(self.line_height_px, &format!("{what}.line_height_px"))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Font, size and line height for each [`StyleLevel`].
pub struct StyleTable {
    /// `%%%title%%%`
    pub title: StyleFont,
    /// `%%bold%%`
    pub bold: StyleFont,
    /// `%italic%`
    pub italic: StyleFont,
    /// Unmarked text.
    pub plain: StyleFont,
}

impl StyleTable {
    /// Every level set in the same font.
    pub fn uniform(font: StyleFont) -> Self {
        Self {
            title: font.clone(),
            bold: font.clone(),
            italic: font.clone(),
            plain: font,
        }
    }

    /// Style for `level`.
    pub fn get(&self, level: StyleLevel) -> &StyleFont {
        match level {
            StyleLevel::Title => &self.title,
            StyleLevel::Bold => &self.bold,
            StyleLevel::Italic => &self.italic,
            StyleLevel::Plain => &self.plain,
        }
    }

    /// Line heights for the layout engine.
    pub fn line_heights(&self) -> LineHeights {
        LineHeights {
            title: self.title.line_height_px,
            bold: self.bold.line_height_px,
            italic: self.italic.line_height_px,
            plain: self.plain.line_height_px,
        }
    }

    fn validate(&self, what: &str) -> CardResult<()> {
        for level in StyleLevel::ALL {
            self.get(level)
                .validate(&format!("{what}.{}", style_key(level)))?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Logo placement: a square of `size_px` inset `margin_px` from the top-right corner.
pub struct LogoPlacement {
    /// Edge length of the (square) logo in pixels.
    pub size_px: u32,
    /// Inset from the top and right canvas edges.
    pub margin_px: u32,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Source caption painted near the bottom-left corner.
pub struct CaptionSpec {
    /// Caption face.
    pub face: TypeFace,
    /// Left edge of the caption.
    pub x: f32,
    /// Distance from the bottom canvas edge to the caption top.
    pub bottom_offset: f32,
    /// Caption opacity in `0..=1`.
    pub opacity: f32,
    /// Caption color.
    pub color: Rgba8,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Configuration of the photo + gradient card.
pub struct GradientCardSpec {
    /// Full-canvas background; its size fixes the output size.
    pub background: String,
    /// Bottom-anchored gradient overlay, painted at native size.
    pub gradient: String,
    /// Logo image.
    pub logo: String,
    /// Logo size and inset.
    pub logo_placement: LogoPlacement,
    /// Top-left of the text block.
    pub text_origin: Point,
    /// Right margin; max text width is `canvas.width - text_origin.x - text_right_margin`.
    pub text_right_margin: f32,
    /// Text color.
    pub text_color: Rgba8,
    /// Per-style fonts.
    pub styles: StyleTable,
    /// Source caption.
    pub caption: CaptionSpec,
}

impl Default for GradientCardSpec {
    fn default() -> Self {
        Self {
            background: "assets/background.png".to_string(),
            gradient: "assets/gradient.png".to_string(),
            logo: "assets/logo.png".to_string(),
            logo_placement: LogoPlacement {
                size_px: 90,
                margin_px: 35,
            },
            text_origin: Point::new(65.0, 480.0),
            text_right_margin: 65.0,
            text_color: Rgba8::WHITE,
            styles: StyleTable {
                title: StyleFont::new(FONT_BLACK, 47.0, 45.0),
                bold: StyleFont::new(FONT_BOLD, 25.0, 30.0),
                italic: StyleFont::new(FONT_LIGHT_ITALIC, 25.0, 30.0),
                plain: StyleFont::new(FONT_LIGHT, 25.0, 30.0),
            },
            caption: CaptionSpec {
                face: TypeFace::new(FONT_LIGHT_ITALIC, 12.5),
                x: 65.0,
                bottom_offset: 50.0,
                opacity: 0.2,
                color: Rgba8::WHITE,
            },
        }
    }
}

impl GradientCardSpec {
    /// Maximum width of a text line on a canvas `canvas_width` wide.
    pub fn max_text_width(&self, canvas_width: u32) -> f32 {
        (canvas_width as f32 - self.text_origin.x - self.text_right_margin).max(1.0)
    }

    /// Font paths this variant needs.
    pub fn font_sources(&self) -> Vec<&str> {
        let mut out: Vec<&str> = StyleLevel::ALL
            .iter()
            .map(|&l| self.styles.get(l).font.as_str())
            .collect();
        out.push(self.caption.face.font.as_str());
        out
    }

    /// Check paths and numeric ranges.
    pub fn validate(&self) -> CardResult<()> {
        for path in [&self.background, &self.gradient, &self.logo] {
            normalize_rel_path(path)?;
        }
        if self.logo_placement.size_px == 0 {
            return Err(CardError::validation(
                "gradient.logo_placement.size_px must be > 0",
            ));
        }
        finite(self.text_origin.x, "gradient.text_origin.x")?;
        finite(self.text_origin.y, "gradient.text_origin.y")?;
        finite(self.text_right_margin, "gradient.text_right_margin")?;
        self.styles.validate("gradient.styles")?;
        self.caption.face.validate("gradient.caption.face")?;
        finite(self.caption.x, "gradient.caption.x")?;
        finite(self.caption.bottom_offset, "gradient.caption.bottom_offset")?;
        unit_interval(self.caption.opacity, "gradient.caption.opacity")
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Configuration of the text-only title card.
pub struct TitleCardSpec {
    /// Full-bleed background; its size fixes the output size.
    pub background: String,
    /// The single (uppercased) face used for every line.
    pub font: StyleFont,
    /// Vertical middle of the first line.
    pub text_start_y: f32,
    /// Horizontal margin on each side; max text width is `canvas.width - 2 * side_margin`.
    pub side_margin: f32,
    /// Extra space after each logical line.
    pub paragraph_gap: f32,
    /// Color before the first blank line.
    pub default_color: Rgba8,
    /// Color of every line after the first blank line.
    pub accent_color: Rgba8,
}

impl Default for TitleCardSpec {
    fn default() -> Self {
        Self {
            background: "assets/bgFull.png".to_string(),
            font: StyleFont::new(FONT_BLACK, 47.0, 48.0),
            text_start_y: 480.0,
            side_margin: 65.0,
            paragraph_gap: 8.0,
            default_color: Rgba8::WHITE,
            accent_color: Rgba8::opaque(0xff, 0xa8, 0x2b),
        }
    }
}

impl TitleCardSpec {
    /// Maximum width of a text line on a canvas `canvas_width` wide.
    pub fn max_text_width(&self, canvas_width: u32) -> f32 {
        (canvas_width as f32 - 2.0 * self.side_margin).max(1.0)
    }

    /// Font paths this variant needs.
    pub fn font_sources(&self) -> Vec<&str> {
        vec![self.font.font.as_str()]
    }

    /// Check paths and numeric ranges.
    pub fn validate(&self) -> CardResult<()> {
        normalize_rel_path(&self.background)?;
        self.font.validate("title.font")?;
        finite(self.text_start_y, "title.text_start_y")?;
        finite(self.side_margin, "title.side_margin")?;
        if !self.paragraph_gap.is_finite() || self.paragraph_gap < 0.0 {
            return Err(CardError::validation(
                "title.paragraph_gap must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Everything a [`crate::CardStudio`] needs: where assets live and how each card looks.
pub struct StudioConfig {
    /// Directory that relative asset and font paths are resolved against.
    pub assets_root: PathBuf,
    /// Photo + gradient card.
    pub gradient: GradientCardSpec,
    /// Text-only title card.
    pub title: TitleCardSpec,
}

impl StudioConfig {
    /// Defaults rooted at `assets_root`.
    pub fn with_root(assets_root: impl Into<PathBuf>) -> Self {
        Self {
            assets_root: assets_root.into(),
            ..Self::default()
        }
    }

    /// Read a JSON config. A relative `assets_root` is resolved against the file's directory.
    pub fn from_path(path: &Path) -> CardResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let mut cfg: Self = serde_json::from_str(&raw)
            .map_err(|e| CardError::validation(format!("config '{}': {e}", path.display())))?;
        if cfg.assets_root.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            cfg.assets_root = base.join(&cfg.assets_root);
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate both variants.
    pub fn validate(&self) -> CardResult<()> {
        self.gradient.validate()?;
        self.title.validate()
    }

    /// Every font path referenced by either variant (may contain duplicates).
    pub fn font_sources(&self) -> Vec<&str> {
        let mut out = self.gradient.font_sources();
        out.extend(self.title.font_sources());
        out
    }
}

const FONT_BLACK: &str = "fonts/gothampro_black.ttf";
const FONT_BOLD: &str = "fonts/gothampro_bold.ttf";
const FONT_LIGHT: &str = "fonts/gothampro_light.ttf";
const FONT_LIGHT_ITALIC: &str = "fonts/gothampro_lightitalic.ttf";

fn style_key(level: StyleLevel) -> &'static str {
    match level {
        StyleLevel::Title => "title",
        StyleLevel::Bold => "bold",
        StyleLevel::Italic => "italic",
        StyleLevel::Plain => "plain",
    }
}

fn positive(v: f32, what: &str) -> CardResult<()> {
    if !v.is_finite() || v <= 0.0 {
        return Err(CardError::validation(format!(
            "{what} must be finite and > 0"
        )));
    }
    Ok(())
}

fn finite(v: f32, what: &str) -> CardResult<()> {
    if !v.is_finite() {
        return Err(CardError::validation(format!("{what} must be finite")));
    }
    Ok(())
}

fn unit_interval(v: f32, what: &str) -> CardResult<()> {
    if !(0.0..=1.0).contains(&v) {
        return Err(CardError::validation(format!("{what} must be in 0..=1")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/card/spec.rs"]
mod tests;
