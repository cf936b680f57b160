//! Line-box text layout.
//!
//! All runs of a logical line are flattened into words (a word may span several styles,
//! e.g. `%%bold%%tail`), wrapped in one greedy pass, and emitted as segments at resolved
//! positions. Each word carries the spaces that follow it; the last word of a line gets one
//! synthetic trailing space so every word is measured the same way.

use std::ops::Range;

use crate::{
    foundation::core::Point,
    layout::measure::{LineHeights, TextMeasure},
    markup::parser::{LogicalLine, StyleLevel, TextRun},
};

/// Pen position advanced by the layout engine.
///
/// `x` resets to the block origin at each logical line; `y` only ever moves down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutCursor {
    /// Left edge of the next segment.
    pub x: f32,
    /// Top of the next visual line.
    pub y: f32,
}

impl LayoutCursor {
    /// Build a cursor.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn advance_line(&mut self, origin_x: f32, dy: f32) {
        self.x = origin_x;
        self.y += dy.max(0.0);
    }
}

/// Horizontal alignment of each visual line relative to the block origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// Lines start at the origin.
    #[default]
    Start,
    /// Lines are centered on the origin (trailing spaces excluded).
    Center,
}

/// Parameters for laying out a block of logical lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockLayout {
    /// Anchor of the first visual line.
    pub origin: Point,
    /// Maximum width of a visual line before wrapping.
    pub max_width: f32,
    /// Horizontal alignment.
    pub align: TextAlign,
    /// Per-style vertical advance.
    pub line_heights: LineHeights,
    /// Extra vertical space added after every logical line.
    pub paragraph_gap: f32,
}

/// A single-style piece of text at a resolved position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedSegment {
    /// Style the text is set in.
    pub style: StyleLevel,
    /// Display text (already case-transformed).
    pub text: String,
    /// Left edge in pixels.
    pub x: f32,
    /// Top of the owning visual line in pixels.
    pub y: f32,
    /// Measured advance width.
    pub width: f32,
    /// Height of the owning visual line.
    pub line_height: f32,
    /// Index of the logical line this segment came from.
    pub source_line: usize,
    /// Index into [`TextBlock::lines`] of the owning visual line.
    pub line: usize,
}

/// One wrapped line of output.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualLine {
    /// Index of the logical line this visual line belongs to.
    pub source_line: usize,
    /// Top of the line.
    pub y: f32,
    /// Vertical advance of the line.
    pub height: f32,
    /// Width without trailing spaces.
    pub width: f32,
}

/// Result of a layout call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextBlock {
    /// Segments in paint order.
    pub segments: Vec<PlacedSegment>,
    /// Visual lines in top-to-bottom order.
    pub lines: Vec<VisualLine>,
    /// Cursor `y` after the last line.
    pub end_y: f32,
}

impl TextBlock {
    /// Concatenated text of every visual line, in order.
    pub fn line_texts(&self) -> Vec<String> {
        let mut out = vec![String::new(); self.lines.len()];
        for seg in &self.segments {
            if let Some(text) = out.get_mut(seg.line) {
                text.push_str(&seg.text);
            }
        }
        out
    }
}

/// Lay out one run from `cursor`, wrapping at `max_width` with a fixed `line_height`.
///
/// Returns the placed block; `end_y == cursor.y + sublines * line_height`.
pub fn layout_run(
    run: &TextRun,
    cursor: LayoutCursor,
    max_width: f32,
    line_height: f32,
    measure: &mut dyn TextMeasure,
) -> TextBlock {
    let params = BlockLayout {
        origin: Point::new(cursor.x, cursor.y),
        max_width,
        align: TextAlign::Start,
        line_heights: LineHeights::uniform(line_height),
        paragraph_gap: 0.0,
    };
    let mut cursor = cursor;
    let mut block = TextBlock::default();
    place_line(
        std::slice::from_ref(run),
        0,
        &mut cursor,
        &params,
        measure,
        &mut block,
    );
    block.end_y = cursor.y;
    block
}

/// Lay out every run of one logical line from `cursor` in a single wrapping pass.
///
/// `params.origin.x` is the x each wrapped visual line returns to; no paragraph gap is added.
pub fn layout_line(
    line: &LogicalLine,
    cursor: LayoutCursor,
    params: &BlockLayout,
    measure: &mut dyn TextMeasure,
) -> TextBlock {
    let mut cursor = cursor;
    let mut block = TextBlock::default();
    place_line(line.runs(), 0, &mut cursor, params, measure, &mut block);
    block.end_y = cursor.y;
    block
}

/// Lay out logical lines top-down from `params.origin`.
#[tracing::instrument(level = "debug", skip(lines, measure), fields(lines = lines.len()))]
pub fn layout_block(
    lines: &[LogicalLine],
    params: &BlockLayout,
    measure: &mut dyn TextMeasure,
) -> TextBlock {
    let mut cursor = LayoutCursor::new(params.origin.x, params.origin.y);
    let mut block = TextBlock::default();
    for (idx, line) in lines.iter().enumerate() {
        place_line(line.runs(), idx, &mut cursor, params, measure, &mut block);
        cursor.advance_line(params.origin.x, params.paragraph_gap);
    }
    block.end_y = cursor.y;
    tracing::debug!(
        visual_lines = block.lines.len(),
        segments = block.segments.len(),
        end_y = block.end_y,
        "text block laid out"
    );
    block
}

#[derive(Debug)]
struct Fragment {
    style: StyleLevel,
    text: String,
    width: f32,
    is_space: bool,
}

#[derive(Debug, Default)]
struct Word {
    fragments: Vec<Fragment>,
    width: f32,
    trailing: f32,
}

impl Word {
    fn ends_with_space(&self) -> bool {
        self.fragments.last().is_some_and(|f| f.is_space)
    }

    fn push(&mut self, fragment: Fragment) {
        if fragment.is_space {
            self.trailing += fragment.width;
        }
        self.width += fragment.width;
        self.fragments.push(fragment);
    }
}

fn place_line(
    runs: &[TextRun],
    source_line: usize,
    cursor: &mut LayoutCursor,
    params: &BlockLayout,
    measure: &mut dyn TextMeasure,
    block: &mut TextBlock,
) {
    let words = collect_words(runs, measure);
    let blank_height = runs
        .iter()
        .map(|r| params.line_heights.get(r.style()))
        .fold(None, |acc: Option<f32>, h| Some(acc.map_or(h, |a| a.max(h))))
        .unwrap_or(params.line_heights.plain);

    for range in wrap_words(&words, params.max_width) {
        let line_words = &words[range];
        let width: f32 = line_words.iter().map(|w| w.width).sum();
        let ink_width = width - line_words.last().map_or(0.0, |w| w.trailing);
        let height = line_words
            .iter()
            .flat_map(|w| &w.fragments)
            .map(|f| params.line_heights.get(f.style))
            .fold(None, |acc: Option<f32>, h| Some(acc.map_or(h, |a| a.max(h))))
            .unwrap_or(blank_height);

        let mut x = match params.align {
            TextAlign::Start => cursor.x,
            TextAlign::Center => cursor.x - ink_width / 2.0,
        };
        let line = block.lines.len();
        for fragment in line_words.iter().flat_map(|w| &w.fragments) {
            match block.segments.last_mut() {
                Some(seg) if seg.line == line && seg.style == fragment.style => {
                    seg.text.push_str(&fragment.text);
                    seg.width += fragment.width;
                }
                _ => block.segments.push(PlacedSegment {
                    style: fragment.style,
                    text: fragment.text.clone(),
                    x,
                    y: cursor.y,
                    width: fragment.width,
                    line_height: height,
                    source_line,
                    line,
                }),
            }
            x += fragment.width;
        }

        block.lines.push(VisualLine {
            source_line,
            y: cursor.y,
            height,
            width: ink_width,
        });
        cursor.advance_line(params.origin.x, height);
    }
}

fn collect_words(runs: &[TextRun], measure: &mut dyn TextMeasure) -> Vec<Word> {
    let mut words = Vec::new();
    let mut current = Word::default();
    let mut last_style = None;

    for run in runs {
        let text = run.display_text();
        for (is_space, chunk) in split_spaces(&text) {
            if !is_space && current.ends_with_space() {
                words.push(std::mem::take(&mut current));
            }
            current.push(Fragment {
                style: run.style(),
                text: chunk.to_string(),
                width: measure.measure(run.style(), chunk),
                is_space,
            });
            last_style = Some(run.style());
        }
    }

    if let Some(style) = last_style
        && !current.ends_with_space()
    {
        current.push(Fragment {
            style,
            text: " ".to_string(),
            width: measure.measure(style, " "),
            is_space: true,
        });
    }
    if !current.fragments.is_empty() {
        words.push(current);
    }
    words
}

/// Split into alternating chunks of spaces and non-spaces.
fn split_spaces(text: &str) -> impl Iterator<Item = (bool, &str)> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let is_space = first == ' ';
        let end = rest
            .char_indices()
            .find(|&(_, c)| (c == ' ') != is_space)
            .map_or(rest.len(), |(i, _)| i);
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some((is_space, chunk))
    })
}

/// Greedy wrap. A line is never flushed empty; an empty word list yields one empty line.
fn wrap_words(words: &[Word], max_width: f32) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut width = 0.0f32;

    for (i, word) in words.iter().enumerate() {
        if i > start && width + word.width > max_width {
            lines.push(start..i);
            start = i;
            width = 0.0;
        }
        width += word.width;
    }
    lines.push(start..words.len());
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/linebox.rs"]
mod tests;
