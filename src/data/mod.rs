// ============================================================
// Layer 4 - Data Pipeline
// ============================================================
// Everything between a text file on disk and the reference
// string handed to the evaluator:
//
//   corpus.txt
//       │
//       ▼
//   TextFileLoader    → reads the file into a Document
//       │
//       ▼
//   split_text        → training prefix / validation suffix
//       │
//       ▼
//   TextDataset       → vocabulary + both splits
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

/// Reads a UTF-8 corpus file
pub mod loader;

/// Holds the vocabulary and the train/valid texts
pub mod dataset;

/// Contiguous train/validation split
pub mod splitter;
