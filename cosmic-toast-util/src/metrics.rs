//! Pixel measurement of text for layout purposes.

use unicode_width::UnicodeWidthChar;

/// Font measurement capability needed to wrap and size a notification.
pub trait TextMeasure {
    /// Rendered width of `text` in pixels.
    fn text_width(&self, text: &str) -> i32;

    /// Height of one rendered line in pixels.
    fn line_height(&self) -> i32;
}

/// Cells between two tab stops.
pub const TAB_STOP: usize = 8;

/// Monospace cell model: every terminal column is `advance` pixels wide.
///
/// Wide characters (CJK, most emoji) take two columns and a tab advances to
/// the next multiple of [`TAB_STOP`]. Other control characters take one
/// column, since the renderer still draws a placeholder for them. Pick
/// `advance` at or above the real glyph advance of the face so measured
/// widths never undershoot what gets drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub advance: i32,
    pub line_height: i32,
}

impl CellMetrics {
    pub const fn new(advance: i32, line_height: i32) -> Self {
        Self {
            advance,
            line_height,
        }
    }

    /// Number of cells `text` occupies when drawn from the start of a line.
    pub fn columns(text: &str) -> usize {
        text.chars().fold(0, |column, ch| match ch {
            '\t' => (column / TAB_STOP + 1) * TAB_STOP,
            '\n' => column,
            _ => column + UnicodeWidthChar::width(ch).unwrap_or(1),
        })
    }
}

impl TextMeasure for CellMetrics {
    fn text_width(&self, text: &str) -> i32 {
        i32::try_from(Self::columns(text))
            .unwrap_or(i32::MAX)
            .saturating_mul(self.advance)
    }

    fn line_height(&self) -> i32 {
        self.line_height
    }
}
