use std::{borrow::Cow, collections::HashMap};

use crate::{
    assets::fonts::FontBook,
    card::spec::{StyleTable, TypeFace},
    foundation::core::Rgba8,
    foundation::error::CardResult,
    layout::measure::TextMeasure,
    markup::parser::StyleLevel,
};

/// A single-line, single-face layout ready to paint.
pub struct ShapedText {
    pub(crate) layout: parley::Layout<Rgba8>,
    pub(crate) font: vello_cpu::peniko::FontData,
}

impl ShapedText {
    /// Advance width including trailing whitespace.
    pub fn width(&self) -> f32 {
        self.layout.full_width()
    }

    /// Line box height.
    pub fn height(&self) -> f32 {
        self.layout.height()
    }
}

impl std::fmt::Debug for ShapedText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapedText")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// A face fully resolved against the [`FontBook`]: nothing left to look up at shaping time.
#[derive(Clone)]
struct ResolvedFace {
    family: String,
    weight: parley::style::FontWeight,
    style: parley::style::FontStyle,
    size_px: f32,
    render: vello_cpu::peniko::FontData,
}

impl ResolvedFace {
    fn resolve(book: &FontBook, face: &TypeFace) -> CardResult<Self> {
        let font = book.get(&face.font)?;
        Ok(Self {
            family: font.family.clone(),
            weight: font.weight,
            style: font.style,
            size_px: face.size_px,
            render: font.render.clone(),
        })
    }
}

/// Request-scoped shaping contexts over a shared [`FontBook`].
///
/// Parley contexts are mutable scratch space, so each request builds its own shaper while
/// the font bytes themselves stay shared. Every style's face is resolved up front, so
/// measuring and shaping by [`StyleLevel`] cannot fail.
pub struct TextShaper<'a> {
    book: &'a FontBook,
    faces: [ResolvedFace; 4],
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8>,
    widths: HashMap<(StyleLevel, String), f32>,
}

impl<'a> TextShaper<'a> {
    /// Register every font of `book` and resolve the face of each style in `styles`.
    pub fn new(book: &'a FontBook, styles: StyleTable) -> CardResult<Self> {
        let faces = [
            ResolvedFace::resolve(book, &styles.title.face())?,
            ResolvedFace::resolve(book, &styles.bold.face())?,
            ResolvedFace::resolve(book, &styles.italic.face())?,
            ResolvedFace::resolve(book, &styles.plain.face())?,
        ];

        let mut font_ctx = parley::FontContext::default();
        for (_, font) in book.iter() {
            font_ctx.collection.register_fonts(font.blob.clone(), None);
        }

        Ok(Self {
            book,
            faces,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            widths: HashMap::new(),
        })
    }

    /// Shape `text` in the face configured for `style`.
    pub fn shape_style(&mut self, style: StyleLevel, text: &str, brush: Rgba8) -> ShapedText {
        let face = &self.faces[face_slot(style)];
        build_line(&mut self.layout_ctx, &mut self.font_ctx, face, text, brush)
    }

    /// Shape `text` as a single unwrapped line in an arbitrary `face` of the book.
    pub fn shape(&mut self, face: &TypeFace, text: &str, brush: Rgba8) -> CardResult<ShapedText> {
        let face = ResolvedFace::resolve(self.book, face)?;
        Ok(build_line(
            &mut self.layout_ctx,
            &mut self.font_ctx,
            &face,
            text,
            brush,
        ))
    }
}

impl TextMeasure for TextShaper<'_> {
    fn measure(&mut self, style: StyleLevel, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        let key = (style, text.to_string());
        if let Some(&w) = self.widths.get(&key) {
            return w;
        }
        let width = self.shape_style(style, text, Rgba8::default()).width();
        self.widths.insert(key, width);
        width
    }
}

fn face_slot(style: StyleLevel) -> usize {
    match style {
        StyleLevel::Title => 0,
        StyleLevel::Bold => 1,
        StyleLevel::Italic => 2,
        StyleLevel::Plain => 3,
    }
}

fn build_line(
    layout_ctx: &mut parley::LayoutContext<Rgba8>,
    font_ctx: &mut parley::FontContext,
    face: &ResolvedFace,
    text: &str,
    brush: Rgba8,
) -> ShapedText {
    let mut builder = layout_ctx.ranged_builder(font_ctx, text, 1.0, true);
    builder.push_default(parley::style::StyleProperty::FontStack(
        parley::style::FontStack::Single(parley::style::FontFamily::Named(Cow::Owned(
            face.family.clone(),
        ))),
    ));
    builder.push_default(parley::style::StyleProperty::FontWeight(face.weight));
    builder.push_default(parley::style::StyleProperty::FontStyle(face.style));
    builder.push_default(parley::style::StyleProperty::FontSize(face.size_px));
    builder.push_default(parley::style::StyleProperty::Brush(brush));

    let mut layout: parley::Layout<Rgba8> = builder.build(text);
    layout.break_all_lines(None);
    layout.align(
        None,
        parley::Alignment::Start,
        parley::AlignmentOptions::default(),
    );

    ShapedText {
        layout,
        font: face.render.clone(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
