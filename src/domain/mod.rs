// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust types and traits that describe what an evaluation
// pass IS: a vocabulary, a transcript, a model capability and
// the errors a pass can end with.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or terminal output
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A loaded corpus file
pub mod document;

// Domain error kinds (lookup failures, degenerate input)
pub mod error;

// Per-line, per-character annotated transcript
pub mod transcript;

// Core abstractions (traits) that other layers implement
pub mod traits;

// Symbol <-> index bijection
pub mod vocabulary;
