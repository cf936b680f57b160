pub(crate) mod gradient;
pub(crate) mod studio;
pub(crate) mod title;

use crate::{
    foundation::core::{Point, Rgba8},
    foundation::error::CardResult,
    layout::linebox::{PlacedSegment, TextBlock},
    render::canvas::CardCanvas,
    text::shaper::TextShaper,
};

/// Which part of a shaped line sits on the segment's `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum VerticalAnchor {
    Top,
    Middle,
}

/// Shape and paint every visible segment of `block`.
pub(crate) fn paint_segments(
    canvas: &mut CardCanvas,
    shaper: &mut TextShaper<'_>,
    block: &TextBlock,
    color_for: impl Fn(&PlacedSegment) -> Rgba8,
    anchor: VerticalAnchor,
) -> CardResult<()> {
    for seg in &block.segments {
        if seg.text.trim().is_empty() {
            continue;
        }
        let color = color_for(seg);
        let shaped = shaper.shape_style(seg.style, &seg.text, color);
        let y = match anchor {
            VerticalAnchor::Top => seg.y,
            VerticalAnchor::Middle => seg.y - shaped.height() / 2.0,
        };
        canvas.draw_text(&shaped, Point::new(seg.x, y), color, 1.0, 1.0);
    }
    Ok(())
}
