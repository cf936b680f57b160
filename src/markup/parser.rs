//! Inline markup for card templates.
//!
//! The grammar is a single level of `%` delimiters:
//!
//! | markup        | style                  |
//! |---------------|------------------------|
//! | `%%%text%%%`  | [`StyleLevel::Title`]  |
//! | `%%text%%`    | [`StyleLevel::Bold`]   |
//! | `%text%`      | [`StyleLevel::Italic`] |
//! | anything else | [`StyleLevel::Plain`]  |
//!
//! Delimiters never nest and never span lines. An opener without a matching closer on the
//! same line is kept as literal plain text.

/// Typographic level of a run. Chosen once, at parse time, from the delimiter width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleLevel {
    /// `%%%…%%%`, rendered uppercase.
    Title,
    /// `%%…%%`.
    Bold,
    /// `%…%`.
    Italic,
    /// Unmarked text.
    Plain,
}

impl StyleLevel {
    /// All levels, in delimiter-width order.
    pub const ALL: [StyleLevel; 4] = [Self::Title, Self::Bold, Self::Italic, Self::Plain];

    /// The delimiter that opens and closes this level, if any.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            Self::Title => Some("%%%"),
            Self::Bold => Some("%%"),
            Self::Italic => Some("%"),
            Self::Plain => None,
        }
    }

    fn from_marker_len(len: usize) -> Self {
        match len {
            3 => Self::Title,
            2 => Self::Bold,
            _ => Self::Italic,
        }
    }

    /// Apply the level's case transform to display text.
    pub fn display_text(self, content: &str) -> String {
        match self {
            Self::Title => content.to_uppercase(),
            _ => content.to_string(),
        }
    }
}

/// A maximal substring of a source line sharing one [`StyleLevel`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun {
    content: String,
    style: StyleLevel,
}

impl TextRun {
    /// Build a run.
    pub fn new(content: impl Into<String>, style: StyleLevel) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    /// Source content with delimiters stripped, original case.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Style level assigned at parse time.
    pub fn style(&self) -> StyleLevel {
        self.style
    }

    /// Content as it should be painted (uppercased for titles).
    pub fn display_text(&self) -> String {
        self.style.display_text(&self.content)
    }
}

/// Ordered runs of one newline-delimited source line. Blank lines have no runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogicalLine {
    runs: Vec<TextRun>,
}

impl LogicalLine {
    /// Wrap an already-split run sequence.
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }

    /// Runs in source order.
    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// True when the line carries no visible characters.
    ///
    /// A line of empty runs (e.g. `%%%%%%`) is blank as well.
    pub fn is_blank(&self) -> bool {
        self.runs.iter().all(|r| r.content.is_empty())
    }

    /// Concatenated run contents (delimiters removed).
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.content.as_str()).collect()
    }
}

/// Split a single line into styled runs.
pub fn parse_line(line: &str) -> LogicalLine {
    let mut runs = Vec::new();
    let mut plain = String::new();
    let mut rest = line;

    while let Some(pct) = rest.find('%') {
        plain.push_str(&rest[..pct]);
        let at_marker = &rest[pct..];

        let opener_len = at_marker.bytes().take_while(|&b| b == b'%').count().min(3);
        let marker = &at_marker[..opener_len];
        let body = &at_marker[opener_len..];

        match body.find(marker) {
            Some(close) => {
                if !plain.is_empty() {
                    runs.push(TextRun::new(std::mem::take(&mut plain), StyleLevel::Plain));
                }
                runs.push(TextRun::new(
                    &body[..close],
                    StyleLevel::from_marker_len(opener_len),
                ));
                rest = &body[close + opener_len..];
            }
            None => {
                plain.push_str(marker);
                rest = body;
            }
        }
    }

    plain.push_str(rest);
    if !plain.is_empty() {
        runs.push(TextRun::new(plain, StyleLevel::Plain));
    }

    LogicalLine { runs }
}

/// Split a whole template into logical lines, keeping blank lines.
pub fn parse_template(template: &str) -> Vec<LogicalLine> {
    split_lines(template).map(parse_line).collect()
}

/// Split on `\n`, dropping one trailing `\r` per line. Blank lines are preserved.
pub fn split_lines(template: &str) -> impl Iterator<Item = &str> {
    template
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
}

#[cfg(test)]
#[path = "../../tests/unit/markup/parser.rs"]
mod tests;
