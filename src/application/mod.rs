// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// The evaluation logic itself (Predictor, Evaluator) plus the
// use cases that wire a run's files, the model and a log sink
// around it.
//
// Rules for this layer:
//   - No model architecture code here (that's Layer 5)
//   - No file formats here (that's Layers 4 and 6)
//   - No argument parsing here (that's Layer 1)
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

/// Stateful greedy next-character predictor
pub mod predictor;

/// Scores predictions over a reference text, renders the transcript
pub mod evaluator;

/// `eval`: resolve a run, score it, record metrics
pub mod eval_use_case;

/// `suggest`: greedy continuation of a prompt
pub mod suggest_use_case;

/// `init`: scaffold a run directory from a corpus
pub mod init_use_case;
