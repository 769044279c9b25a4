// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Cross-cutting concerns that touch the filesystem or the
// terminal:
//
//   checkpoint.rs - Run store
//                   Resolves a run id to its RunConfig, its
//                   vocabulary and its Burn weights.
//
//   metrics.rs    - Evaluation metrics logging
//                   Appends one CSV row per evaluation pass.
//
//   log_sink.rs   - Transcript output
//                   Styled terminal writer and an in-memory
//                   sink for tests.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)
//            Burn Book §5 (Checkpointing)

/// Run directories: config, vocabulary, weights
pub mod checkpoint;

/// Evaluation metrics CSV logger
pub mod metrics;

/// Terminal and in-memory transcript sinks
pub mod log_sink;
