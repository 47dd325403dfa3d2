//! Fitting notification text into a fixed pixel width.
//!
//! Text is consumed line by line from the front. A line ends at the first of:
//! - the end of the text, when everything left fits,
//! - an embedded `\n`,
//! - the last space before the first character that overflows the budget.
//!
//! When no space exists before the overflow point the line is cut after
//! `max_width / line_height` characters. That count is not measured against
//! the budget, so such a line may still be too wide.

use std::fmt;
use std::ops::Deref;

use crate::metrics::TextMeasure;

/// How a [`DisplayLine`] was terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineBreak {
    /// Broken at a space; the space was consumed.
    Word,
    /// Broken at an embedded `\n`; the newline was consumed.
    Newline,
    /// Cut inside an unbreakable run of characters.
    Forced,
    /// Last line of the text.
    End,
}

/// One line of wrapped text, ready to be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayLine {
    text: String,
    ending: LineBreak,
}

impl DisplayLine {
    fn new(text: &str, ending: LineBreak) -> Self {
        Self {
            text: text.to_owned(),
            ending,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ending(&self) -> LineBreak {
        self.ending
    }
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Ordered output of [`wrap`]. The first line is the title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSet {
    lines: Vec<DisplayLine>,
}

impl LineSet {
    pub fn title(&self) -> Option<&DisplayLine> {
        self.lines.first()
    }

    pub fn body(&self) -> &[DisplayLine] {
        self.lines.get(1..).unwrap_or_default()
    }

    /// Rebuild the wrapped text, putting a single space back wherever a space
    /// or newline was consumed by a break.
    pub fn rejoin(&self) -> String {
        let mut text = String::with_capacity(self.lines.iter().map(|l| l.text.len() + 1).sum());
        for line in &self.lines {
            text.push_str(&line.text);
            if matches!(line.ending, LineBreak::Word | LineBreak::Newline) {
                text.push(' ');
            }
        }
        text
    }
}

impl Deref for LineSet {
    type Target = [DisplayLine];

    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}

impl<'a> IntoIterator for &'a LineSet {
    type Item = &'a DisplayLine;
    type IntoIter = std::slice::Iter<'a, DisplayLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Break {
    /// Byte length of the line's text.
    line_end: usize,
    /// Bytes removed from the remaining text, terminator included.
    consumed: usize,
    kind: LineBreak,
}

impl Break {
    const fn at_end(len: usize) -> Self {
        Self {
            line_end: len,
            consumed: len,
            kind: LineBreak::End,
        }
    }

    const fn newline(pos: usize) -> Self {
        Self {
            line_end: pos,
            consumed: pos + 1,
            kind: LineBreak::Newline,
        }
    }
}

/// Split `text` into lines no wider than `max_width` pixels.
pub fn wrap<M>(text: &str, max_width: i32, measure: &M) -> LineSet
where
    M: TextMeasure + ?Sized,
{
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let next = next_break(rest, max_width, measure);
        if next.consumed == 0 {
            tracing::debug!(
                remaining = rest.len(),
                max_width,
                "no progress possible, dropping the rest of the text"
            );
            break;
        }

        lines.push(DisplayLine::new(&rest[..next.line_end], next.kind));
        rest = &rest[next.consumed..];
    }

    tracing::debug!(lines = lines.len(), max_width, "wrapped notification text");
    LineSet { lines }
}

fn next_break<M>(rest: &str, max_width: i32, measure: &M) -> Break
where
    M: TextMeasure + ?Sized,
{
    if measure.text_width(rest) <= max_width {
        return match rest.find('\n') {
            Some(pos) => Break::newline(pos),
            None => Break::at_end(rest.len()),
        };
    }

    // Widths of successive prefixes never shrink, so the first overflowing
    // prefix decides the break.
    for (idx, ch) in rest.char_indices() {
        if ch == '\n' {
            return Break::newline(idx);
        }

        let prefix = &rest[..idx + ch.len_utf8()];
        if measure.text_width(prefix) <= max_width {
            continue;
        }

        return match prefix.rfind(' ') {
            Some(space) if space > 0 => Break {
                line_end: space,
                consumed: space + 1,
                kind: LineBreak::Word,
            },
            _ => forced_break(rest, max_width, measure.line_height()),
        };
    }

    Break::at_end(rest.len())
}

fn forced_break(rest: &str, max_width: i32, line_height: i32) -> Break {
    let budget = if line_height > 0 {
        usize::try_from(max_width / line_height).unwrap_or(0)
    } else {
        0
    };
    let end = rest
        .char_indices()
        .nth(budget)
        .map_or(rest.len(), |(idx, _)| idx);

    tracing::debug!(chars = budget, "no space before overflow, cutting line");
    Break {
        line_end: end,
        consumed: end,
        kind: LineBreak::Forced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::CellMetrics;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // Ten 10px cells fit in 100px; the forced cut is 100 / 20 = 5 characters.
    const METRICS: CellMetrics = CellMetrics::new(10, 20);
    const WIDTH: i32 = 100;

    fn texts(lines: &LineSet) -> Vec<&str> {
        lines.iter().map(DisplayLine::text).collect()
    }

    fn endings(lines: &LineSet) -> Vec<LineBreak> {
        lines.iter().map(DisplayLine::ending).collect()
    }

    #[test]
    fn test_short_text_is_one_line() {
        let lines = wrap("hello", WIDTH, &METRICS);
        assert_eq!(texts(&lines), ["hello"]);
        assert_eq!(endings(&lines), [LineBreak::End]);
        assert_eq!(lines.title().map(DisplayLine::text), Some("hello"));
        assert!(lines.body().is_empty());
    }

    #[test]
    fn test_text_exactly_at_budget_fits() {
        let lines = wrap("abcdefghij", WIDTH, &METRICS);
        assert_eq!(texts(&lines), ["abcdefghij"]);
    }

    #[test]
    fn test_breaks_at_last_space_before_overflow() {
        let lines = wrap("hello world", WIDTH, &METRICS);
        assert_eq!(texts(&lines), ["hello", "world"]);
        assert_eq!(endings(&lines), [LineBreak::Word, LineBreak::End]);
    }

    #[test]
    fn test_overflow_on_a_space_breaks_there() {
        let lines = wrap("aaaaaaaaaa bbb", WIDTH, &METRICS);
        assert_eq!(texts(&lines), ["aaaaaaaaaa", "bbb"]);
    }

    #[test]
    fn test_many_words() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", WIDTH, &METRICS);
        assert_eq!(
            texts(&lines),
            ["the quick", "brown fox", "jumps over", "the lazy", "dog"]
        );
        assert_eq!(lines.body().len(), 4);
    }

    #[test]
    fn test_embedded_newline_in_fitting_text() {
        let lines = wrap("ab\ncd", WIDTH, &METRICS);
        assert_eq!(texts(&lines), ["ab", "cd"]);
        assert_eq!(endings(&lines), [LineBreak::Newline, LineBreak::End]);
    }

    #[test]
    fn test_newline_before_overflow() {
        let lines = wrap("short\nthis line is long", WIDTH, &METRICS);
        assert_eq!(texts(&lines), ["short", "this line", "is long"]);
        assert_eq!(lines[0].ending(), LineBreak::Newline);
    }

    #[test]
    fn test_leading_and_blank_lines() {
        let lines = wrap("\n\nx", WIDTH, &METRICS);
        assert_eq!(texts(&lines), ["", "", "x"]);
    }

    #[test]
    fn test_trailing_newline_is_consumed() {
        let lines = wrap("done\n", WIDTH, &METRICS);
        assert_eq!(texts(&lines), ["done"]);
        assert_eq!(lines.rejoin(), "done ");
    }

    #[test]
    fn test_unbreakable_token_uses_character_count_fallback() {
        let lines = wrap("abcdefghijklmnop", WIDTH, &METRICS);
        assert_eq!(texts(&lines), ["abcde", "fghij", "klmnop"]);
        assert_eq!(
            endings(&lines),
            [LineBreak::Forced, LineBreak::Forced, LineBreak::End]
        );
    }

    #[test]
    fn test_fallback_is_not_width_checked() {
        // 30px line height over a 100px budget cuts after 3 characters even
        // though far more would fit; wide cells cut after 3 characters that
        // do not fit at all.
        let tall = CellMetrics::new(10, 30);
        let lines = wrap("abcdefghijklm", WIDTH, &tall);
        assert_eq!(lines[0].text(), "abc");

        let wide = CellMetrics::new(40, 30);
        let lines = wrap("abcdefghijklm", WIDTH, &wide);
        assert_eq!(lines[0].text(), "abc");
        assert!(wide.text_width(lines[0].text()) > WIDTH);
    }

    #[test]
    fn test_leading_space_is_not_a_break_opportunity() {
        let lines = wrap(" bbbbbbbbbbbb", WIDTH, &METRICS);
        assert_eq!(lines[0].text(), " bbbb");
        assert_eq!(lines[0].ending(), LineBreak::Forced);
    }

    #[test]
    fn test_zero_length_break_stops() {
        // 10 / 20 rounds down to a zero character cut.
        let lines = wrap("abcdefghijkl", 10, &METRICS);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_empty_text() {
        let lines = wrap("", WIDTH, &METRICS);
        assert!(lines.is_empty());
        assert_eq!(lines.title(), None);
        assert_eq!(lines.rejoin(), "");
    }

    #[test]
    fn test_multibyte_text() {
        let lines = wrap("héllo wörld ünïcode çafé", WIDTH, &METRICS);
        assert_eq!(texts(&lines), ["héllo", "wörld", "ünïcode", "çafé"]);
    }

    #[test]
    fn test_wide_characters_measured_in_cells() {
        // Each character is two cells, so five fit per line.
        let lines = wrap("日本語 日本語 日本語", WIDTH, &METRICS);
        assert_eq!(texts(&lines), ["日本語", "日本語", "日本語"]);
    }

    fn generated_texts(newlines: bool) -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        (0..200)
            .map(|_| {
                let words = rng.gen_range(1..=40);
                let mut text = String::new();
                for i in 0..words {
                    if i > 0 {
                        text.push_str(match rng.gen_range(0..10) {
                            0 if newlines => "\n",
                            1 => "  ",
                            2 => "\t",
                            _ => " ",
                        });
                    }
                    for _ in 0..rng.gen_range(1..=10) {
                        text.push(rng.gen_range('a'..='z'));
                    }
                }
                text
            })
            .collect()
    }

    #[test]
    fn test_tabs_count_toward_the_budget() {
        // "a\tb" spans nine cells, so a second word never fits beside it.
        let lines = wrap("a\tb a\tb a\tb", WIDTH, &METRICS);
        assert_eq!(texts(&lines), ["a\tb", "a\tb", "a\tb"]);
        for line in &lines {
            assert!(METRICS.text_width(line.text()) <= WIDTH);
        }
    }

    #[test]
    fn test_tab_run_does_not_fit_on_one_line() {
        let metrics = CellMetrics::new(8, 19);
        let text = format!("name{}value", "\t".repeat(60));
        let lines = wrap(&text, 420, &metrics);

        assert!(lines.len() > 1);
        assert_eq!(lines[0].ending(), LineBreak::Forced);
        assert_eq!(lines[0].text().chars().count(), 420 / 19);
    }

    #[test]
    fn test_lines_fit_budget() {
        for text in generated_texts(true) {
            let lines = wrap(&text, WIDTH, &METRICS);
            for line in lines.iter().filter(|l| l.ending() != LineBreak::Forced) {
                assert!(
                    METRICS.text_width(line.text()) <= WIDTH,
                    "{:?} too wide in {:?}",
                    line.text(),
                    text
                );
            }
        }
    }

    #[test]
    fn test_wrapping_preserves_content() {
        for text in generated_texts(true) {
            let lines = wrap(&text, WIDTH, &METRICS);
            assert_eq!(lines.rejoin(), text.replace('\n', " "), "text {text:?}");
        }
    }

    #[test]
    fn test_wrapping_is_idempotent() {
        for text in generated_texts(false) {
            let lines = wrap(&text, WIDTH, &METRICS);
            let again = wrap(&lines.rejoin(), WIDTH, &METRICS);
            assert_eq!(lines, again, "text {text:?}");
        }
    }
}
