// ============================================================
// Layer 2 - Evaluator
// ============================================================
// Scores a model's greedy next-character guesses over a fixed
// reference text and renders a transcript of the result.
//
// For every position i in 0..len-1:
//
//   predicted = suggestion(text[i])       ← model sees text[i]
//   actual    = text[i + 1]
//
//   actual == '\r' → skipped: not counted, not shown
//   actual == '\n' → counted, current line flushed,
//                    next line opened with its number
//   otherwise      → counted, appended (Underline on a hit,
//                    Subtle on a miss)
//
// accuracy = correct / (len - 1)
//
// The denominator still includes the '\r' positions even though
// they can never add to `correct`. Texts with Windows line
// endings therefore score a little lower than the same text
// with '\n' endings.

use anyhow::Result;
use std::time::{Duration, Instant};

use crate::application::predictor::Predictor;
use crate::domain::error::EvalError;
use crate::domain::traits::{LogSink, SequenceModel};
use crate::domain::transcript::{Segment, Style, TranscriptLine};
use crate::domain::vocabulary::Vocabulary;

/// Outcome of one evaluation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalReport {
    /// Positions whose greedy prediction matched
    pub correct:  usize,
    /// Positions in the denominator: text length - 1
    pub scored:   usize,
    /// Transcript lines written to the sink
    pub lines:    usize,
    /// correct / scored
    pub accuracy: f64,
    pub elapsed:  Duration,
}

/// Owns one predictor and one reference text; eval() uses both up.
pub struct Evaluator<'a, M: SequenceModel> {
    text:      Vec<char>,
    predictor: Predictor<'a, M>,
}

impl<'a, M: SequenceModel> Evaluator<'a, M> {
    pub fn new(model: &'a M, vocab: &'a Vocabulary, text: &str) -> Self {
        Self {
            text:      text.chars().collect(),
            predictor: Predictor::new(model, vocab),
        }
    }

    pub fn eval(mut self, sink: &mut dyn LogSink) -> Result<EvalReport> {
        let len = self.text.len();
        if len < 2 {
            return Err(EvalError::DegenerateText { len }.into());
        }

        let started = Instant::now();
        let mut transcript = TranscriptWriter::new();
        transcript.feed(self.text[0], Style::Subtle, sink)?;

        let mut correct = 0usize;
        for i in 0..len - 1 {
            let predicted = self.predictor.get_suggestion(self.text[i])?;
            let actual = self.text[i + 1];
            if actual == '\r' {
                continue;
            }

            let hit = predicted == actual;
            if hit {
                correct += 1;
            }
            let style = if hit { Style::Underline } else { Style::Subtle };
            transcript.feed(actual, style, sink)?;
        }
        let lines = transcript.finish(sink)?;

        let scored   = len - 1;
        let accuracy = correct as f64 / scored as f64;
        sink.log(&[
            Segment::new("Accuracy: ", Style::Plain),
            Segment::new(format!("{accuracy:.2}"), Style::Value),
        ])?;

        let elapsed = started.elapsed();
        tracing::info!(
            "Scored {} positions in {:.2?} ({} correct)",
            scored, elapsed, correct,
        );

        Ok(EvalReport { correct, scored, lines, accuracy, elapsed })
    }
}

/// Builds transcript lines and flushes them on newlines.
struct TranscriptWriter {
    line_no: usize,
    line:    TranscriptLine,
    flushed: usize,
}

impl TranscriptWriter {
    fn new() -> Self {
        Self { line_no: 1, line: TranscriptLine::new(1), flushed: 0 }
    }

    /// '\r' is dropped, '\n' ends the line, anything else is appended
    fn feed(&mut self, symbol: char, style: Style, sink: &mut dyn LogSink) -> Result<()> {
        match symbol {
            '\r' => Ok(()),
            '\n' => {
                self.flush(sink)?;
                self.line_no += 1;
                self.line = TranscriptLine::new(self.line_no);
                Ok(())
            }
            c => {
                self.line.push(c, style);
                Ok(())
            }
        }
    }

    fn flush(&mut self, sink: &mut dyn LogSink) -> Result<()> {
        sink.log(self.line.segments())?;
        self.flushed += 1;
        Ok(())
    }

    /// Flush the last, possibly partial, line; returns lines written
    fn finish(mut self, sink: &mut dyn LogSink) -> Result<usize> {
        self.flush(sink)?;
        Ok(self.flushed)
    }
}
