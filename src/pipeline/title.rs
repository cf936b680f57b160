//! Text-only card: full-bleed background and centered, two-tone uppercase lines.

use crate::{
    assets::{fonts::FontBook, store::AssetLoader},
    card::request::RenderedCard,
    card::spec::{StyleTable, TitleCardSpec},
    foundation::core::{Canvas, Point, Rgba8},
    foundation::error::CardResult,
    layout::linebox::{BlockLayout, TextAlign, layout_block},
    layout::measure::LineHeights,
    markup::parser::{LogicalLine, StyleLevel, TextRun, split_lines},
    pipeline::{VerticalAnchor, paint_segments},
    render::{canvas::CardCanvas, encode::encode_png},
    text::shaper::TextShaper,
};

/// Color of each source line: `default` up to and including the first empty line, `accent`
/// for every line after it. Without an empty line everything is `default`.
pub fn paragraph_colors(lines: &[&str], default: Rgba8, accent: Rgba8) -> Vec<Rgba8> {
    let first_blank = lines.iter().position(|l| l.is_empty());
    (0..lines.len())
        .map(|idx| match first_blank {
            Some(blank) if idx > blank => accent,
            _ => default,
        })
        .collect()
}

/// Composite one title card.
#[tracing::instrument(level = "debug", skip_all, fields(template_lines = template.lines().count()))]
pub(crate) fn render_title_card(
    spec: &TitleCardSpec,
    loader: &AssetLoader,
    fonts: &FontBook,
    template: &str,
) -> CardResult<RenderedCard> {
    let background = loader.load_image(&spec.background)?;
    let canvas_size = Canvas::new(background.width(), background.height())?;
    let (width, height) = (canvas_size.width, canvas_size.height);

    let raw: Vec<&str> = split_lines(template).collect();
    let colors = paragraph_colors(&raw, spec.default_color, spec.accent_color);
    let lines: Vec<LogicalLine> = raw
        .iter()
        .map(|l| LogicalLine::from_runs(vec![TextRun::new(*l, StyleLevel::Title)]))
        .collect();

    let mut shaper = TextShaper::new(fonts, StyleTable::uniform(spec.font.clone()))?;
    let block = layout_block(
        &lines,
        &BlockLayout {
            origin: Point::new(width as f32 / 2.0, spec.text_start_y),
            max_width: spec.max_text_width(width),
            align: TextAlign::Center,
            line_heights: LineHeights::uniform(spec.font.line_height_px),
            paragraph_gap: spec.paragraph_gap,
        },
        &mut shaper,
    );

    let mut canvas = CardCanvas::new(canvas_size)?;
    canvas.draw_image(&background, Point::default())?;
    paint_segments(
        &mut canvas,
        &mut shaper,
        &block,
        |seg| {
            colors
                .get(seg.source_line)
                .copied()
                .unwrap_or(spec.default_color)
        },
        VerticalAnchor::Middle,
    )?;

    tracing::debug!(
        width,
        height,
        visual_lines = block.lines.len(),
        accent_lines = colors.iter().filter(|&&c| c == spec.accent_color).count(),
        "title card composed"
    );

    let png = encode_png(&canvas.finish()?)?;
    Ok(RenderedCard { width, height, png })
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/title.rs"]
mod tests;
