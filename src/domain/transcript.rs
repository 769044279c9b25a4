// ============================================================
// Layer 3 - Transcript Types
// ============================================================
// The evaluator renders the reference text line by line, each
// character tagged with how the model did on it:
//
//      2: def main():
//      ^^^^^^ Meta  (line number prefix)
//            ^^^ Underline where the model predicted the char,
//                Subtle where it did not
//
// A TranscriptLine is built up one segment at a time and handed
// to a LogSink when the reference text reaches a newline. How
// the styles look on screen is the sink's business.

use serde::{Deserialize, Serialize};

/// Visual role of a transcript segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Style {
    /// Unstyled text, e.g. the "Accuracy: " label
    Plain,
    /// Line-number prefixes
    Meta,
    /// Characters the model missed, and the first character of the text
    Subtle,
    /// Characters the model predicted correctly
    Underline,
    /// Final metric values
    Value,
}

/// One run of text with a single style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text:  String,
    pub style: Style,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self { text: text.into(), style }
    }
}

/// Right-justified line prefix: "   1: ", "  42: ", " 1000: ".
///
/// The number gets a leading space for its (absent) sign and is
/// padded to width 4, so five-digit line numbers still keep one
/// space in front.
pub fn line_prefix(line_no: usize) -> String {
    format!("{:>4}: ", format!(" {line_no}"))
}

/// One line of the annotated transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    segments: Vec<Segment>,
}

impl TranscriptLine {
    /// Start a new line carrying its numbered prefix
    pub fn new(line_no: usize) -> Self {
        Self {
            segments: vec![Segment::new(line_prefix(line_no), Style::Meta)],
        }
    }

    pub fn push(&mut self, symbol: char, style: Style) {
        self.segments.push(Segment::new(symbol, style));
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Concatenate segment texts, ignoring styles.
pub fn render_plain(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_prefix_widths() {
        assert_eq!(line_prefix(1), "   1: ");
        assert_eq!(line_prefix(42), "  42: ");
        assert_eq!(line_prefix(999), " 999: ");
        assert_eq!(line_prefix(1000), " 1000: ");
        assert_eq!(line_prefix(12345), " 12345: ");
    }

    #[test]
    fn test_line_accumulates_segments_in_order() {
        let mut line = TranscriptLine::new(3);
        line.push('a', Style::Subtle);
        line.push('b', Style::Underline);

        assert_eq!(render_plain(line.segments()), "   3: ab");
        let styles: Vec<Style> = line.segments().iter().map(|s| s.style).collect();
        assert_eq!(styles, vec![Style::Meta, Style::Subtle, Style::Underline]);
    }
}
