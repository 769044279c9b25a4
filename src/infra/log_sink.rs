// ============================================================
// Layer 6 - Log Sinks
// ============================================================
// Where the evaluator's transcript ends up.
//
//   TerminalSink  - writes each line to any io::Write, styled
//                   with crossterm ANSI attributes, or as plain
//                   text when colour is off or the output is
//                   not a tty (pipes, files)
//   MemorySink    - keeps every line, used by tests
//
// Style mapping on a terminal:
//   Meta      → dark cyan       (line numbers)
//   Subtle    → dark grey       (missed characters)
//   Underline → underlined      (predicted characters)
//   Value     → bold magenta    (final metric)
//   Plain     → unchanged
//
// Reference: crossterm docs (style::Stylize, queue!)

use anyhow::Result;
use std::io::{self, Write};
use crossterm::{
    queue,
    style::{Print, PrintStyledContent, Stylize},
    tty::IsTty,
};

use crate::domain::traits::LogSink;
use crate::domain::transcript::{render_plain, Segment, Style};

pub struct TerminalSink<W: Write> {
    out:     W,
    colored: bool,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout(colored: bool) -> Self {
        Self::detect(io::stdout(), colored)
    }
}

impl<W: Write + IsTty> TerminalSink<W> {
    /// Styles only when asked for and `out` is a terminal
    pub fn detect(out: W, colored: bool) -> Self {
        let colored = colored && out.is_tty();
        Self::new(out, colored)
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, colored: bool) -> Self {
        Self { out, colored }
    }

    fn write_styled(&mut self, segment: &Segment) -> io::Result<()> {
        let text = segment.text.as_str();
        match segment.style {
            Style::Plain     => queue!(self.out, Print(text)),
            Style::Meta      => queue!(self.out, PrintStyledContent(text.dark_cyan())),
            Style::Subtle    => queue!(self.out, PrintStyledContent(text.dark_grey())),
            Style::Underline => queue!(self.out, PrintStyledContent(text.underlined())),
            Style::Value     => queue!(self.out, PrintStyledContent(text.magenta().bold())),
        }
    }
}

impl<W: Write> LogSink for TerminalSink<W> {
    fn log(&mut self, segments: &[Segment]) -> Result<()> {
        if self.colored {
            for segment in segments {
                self.write_styled(segment)?;
            }
        } else {
            self.out.write_all(render_plain(segments).as_bytes())?;
        }
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Records every logged line in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: Vec<Vec<Segment>>,
}

#[cfg(test)]
impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each logged line with styles dropped
    pub fn rendered(&self) -> Vec<String> {
        self.lines.iter().map(|l| render_plain(l)).collect()
    }
}

#[cfg(test)]
impl LogSink for MemorySink {
    fn log(&mut self, segments: &[Segment]) -> Result<()> {
        self.lines.push(segments.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Segment> {
        vec![
            Segment::new("   1: ", Style::Meta),
            Segment::new("a", Style::Subtle),
            Segment::new("b", Style::Underline),
        ]
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let mut buf = Vec::new();
        TerminalSink::new(&mut buf, false).log(&sample()).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert_eq!(out, "   1: ab\n");
    }

    #[test]
    fn test_colored_output_keeps_text_and_adds_styles() {
        let mut buf = Vec::new();
        TerminalSink::new(&mut buf, true).log(&sample()).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("\u{1b}["));
        assert!(out.contains("   1: "));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn test_redirected_output_is_never_styled() {
        use std::io::{Read, Seek, SeekFrom};

        let mut file = tempfile::tempfile().unwrap();
        TerminalSink::detect(file.try_clone().unwrap(), true)
            .log(&sample())
            .unwrap();

        let mut out = String::new();
        file.seek(SeekFrom::Start(0)).unwrap();
        file.read_to_string(&mut out).unwrap();
        assert_eq!(out, "   1: ab\n");
    }

    #[test]
    fn test_memory_sink_records_lines() {
        let mut sink = MemorySink::new();
        sink.log(&sample()).unwrap();
        sink.log(&[Segment::new("x", Style::Plain)]).unwrap();
        assert_eq!(sink.rendered(), vec!["   1: ab", "x"]);
    }
}
