//! Photo card: background, cover-cropped photo, logo, bottom gradient, styled text, caption.

use crate::{
    assets::{decode::decode_image, fonts::FontBook, store::AssetLoader},
    card::request::RenderedCard,
    card::spec::GradientCardSpec,
    foundation::core::{Canvas, Point},
    foundation::error::{CardError, CardResult},
    layout::linebox::{BlockLayout, TextAlign, layout_block},
    markup::parser::parse_template,
    pipeline::{VerticalAnchor, paint_segments},
    render::{
        canvas::CardCanvas,
        crop::{crop_to_cover, resize_exact},
        encode::encode_png,
    },
    text::shaper::TextShaper,
};

/// Composite one gradient card.
///
/// Every asset is loaded and the photo decoded before anything is painted, so a failure never
/// leaves a half-drawn canvas behind.
#[tracing::instrument(level = "debug", skip_all, fields(template_lines = template.lines().count()))]
pub(crate) fn render_gradient_card(
    spec: &GradientCardSpec,
    loader: &AssetLoader,
    fonts: &FontBook,
    photo: Option<&[u8]>,
    template: &str,
    caption: &str,
) -> CardResult<RenderedCard> {
    let background = loader.load_image(&spec.background)?;
    let gradient = loader.load_image(&spec.gradient)?;
    let logo = loader.load_image(&spec.logo)?;
    let photo = photo.ok_or_else(|| CardError::image_decode("gradient card needs a photo"))?;
    let photo = decode_image(photo).map_err(CardError::image_decode_from)?;

    let canvas_size = Canvas::new(background.width(), background.height())?;
    let (width, height) = (canvas_size.width, canvas_size.height);

    let photo = crop_to_cover(&photo, width, (height / 2).max(1))?;
    let logo_px = spec.logo_placement.size_px;
    let logo = resize_exact(&logo, logo_px, logo_px)?;

    let mut shaper = TextShaper::new(fonts, spec.styles.clone())?;
    let lines = parse_template(template);
    let max_width = spec.max_text_width(width);
    let block = layout_block(
        &lines,
        &BlockLayout {
            origin: spec.text_origin,
            max_width,
            align: TextAlign::Start,
            line_heights: spec.styles.line_heights(),
            paragraph_gap: 0.0,
        },
        &mut shaper,
    );
    let caption_text = shaper.shape(
        &spec.caption.face,
        &caption_line(caption),
        spec.caption.color,
    )?;

    let mut canvas = CardCanvas::new(canvas_size)?;
    canvas.draw_image(&background, Point::default())?;
    canvas.draw_image(&photo, Point::default())?;
    let logo_x = width as f32 - logo_px as f32 - spec.logo_placement.margin_px as f32;
    canvas.draw_image(
        &logo,
        Point::new(logo_x, spec.logo_placement.margin_px as f32),
    )?;
    canvas.draw_image(
        &gradient,
        Point::new(0.0, height as f32 - gradient.height() as f32),
    )?;

    paint_segments(
        &mut canvas,
        &mut shaper,
        &block,
        |_| spec.text_color,
        VerticalAnchor::Top,
    )?;

    let caption_width = caption_text.width();
    let x_scale = if caption_width > max_width {
        max_width / caption_width
    } else {
        1.0
    };
    canvas.draw_text(
        &caption_text,
        Point::new(spec.caption.x, height as f32 - spec.caption.bottom_offset),
        spec.caption.color,
        spec.caption.opacity,
        x_scale,
    );

    tracing::debug!(
        width,
        height,
        visual_lines = block.lines.len(),
        caption_x_scale = x_scale,
        "gradient card composed"
    );

    let png = encode_png(&canvas.finish()?)?;
    Ok(RenderedCard { width, height, png })
}

/// The caption is painted as one line: every line break becomes a single space.
pub(crate) fn caption_line(caption: &str) -> String {
    caption.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/gradient.rs"]
mod tests;
