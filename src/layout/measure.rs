use crate::markup::parser::StyleLevel;

/// Width oracle used by the layout engine.
///
/// Implementations must be deterministic for the lifetime of a request: the same
/// `(style, text)` pair always measures the same.
pub trait TextMeasure {
    /// Advance width of `text` set in `style`, in device pixels.
    fn measure(&mut self, style: StyleLevel, text: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: FnMut(StyleLevel, &str) -> f32,
{
    fn measure(&mut self, style: StyleLevel, text: &str) -> f32 {
        self(style, text)
    }
}

/// Per-style vertical advance applied for each wrapped visual line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineHeights {
    /// Line height for [`StyleLevel::Title`].
    pub title: f32,
    /// Line height for [`StyleLevel::Bold`].
    pub bold: f32,
    /// Line height for [`StyleLevel::Italic`].
    pub italic: f32,
    /// Line height for [`StyleLevel::Plain`].
    pub plain: f32,
}

impl LineHeights {
    /// Same height for every style.
    pub const fn uniform(height: f32) -> Self {
        Self {
            title: height,
            bold: height,
            italic: height,
            plain: height,
        }
    }

    /// Height configured for `style`.
    pub fn get(&self, style: StyleLevel) -> f32 {
        match style {
            StyleLevel::Title => self.title,
            StyleLevel::Bold => self.bold,
            StyleLevel::Italic => self.italic,
            StyleLevel::Plain => self.plain,
        }
    }
}
