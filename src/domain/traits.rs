// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The evaluator never names a concrete model, corpus format or
// output device. It works against these traits:
//
//   SequenceModel  -> one recurrent step: index + state in,
//                     distribution + new state out
//   CorpusSource   -> where reference text comes from
//   LogSink        -> where transcript lines go
//
// SequenceModel::State is opaque to everything outside the
// model. The predictor holds it as Option<State>, moves it into
// step() and stores whatever comes back, so a state value is
// never shared or mutated in place.
//
// Reference: Rust Book §10 (Traits), §19 (Associated Types)

use anyhow::Result;

use crate::domain::document::Document;
use crate::domain::transcript::Segment;

// ─── SequenceModel ────────────────────────────────────────────────────────────
/// A stateful next-symbol model, advanced one symbol at a time.
///
/// Implementations:
///   - LstmStepper  -> burn LSTM loaded from a run checkpoint
///   - test doubles -> lookup-table models in unit tests
pub trait SequenceModel {
    /// Recurrent memory carried between steps
    type State;

    /// Feed one symbol index. `state` is None at the start of a
    /// sequence and the model substitutes its own default.
    ///
    /// Returns a score per vocabulary index (higher is more
    /// likely) for the position just fed, plus the next state.
    fn step(&self, index: usize, state: Option<Self::State>) -> Result<(Vec<f32>, Self::State)>;
}

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Any component that can supply a text corpus.
///
/// Implementations:
///   - TextFileLoader -> reads a UTF-8 file
pub trait CorpusSource {
    fn load(&self) -> Result<Document>;
}

// ─── LogSink ──────────────────────────────────────────────────────────────────
/// Receives rendered transcript lines and summary lines.
///
/// Implementations:
///   - TerminalSink -> styled (or plain) text on a writer
///   - MemorySink   -> keeps every line, for tests
pub trait LogSink {
    fn log(&mut self, segments: &[Segment]) -> Result<()>;
}
