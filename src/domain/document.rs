// ============================================================
// Layer 3 - Document Domain Type
// ============================================================
// A single text corpus loaded from disk: where it came from
// and its full, untouched content. Carriage returns and
// newlines are kept exactly as they appear in the file,
// since the evaluator treats both specially.

use serde::{Deserialize, Serialize};

/// A raw corpus loaded from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// The file path, kept for traceability in logs and metrics
    pub source: String,

    /// The full text content
    pub text: String,
}

impl Document {
    /// Create a new Document with a source path and text content.
    ///
    /// Example:
    ///   let doc = Document::new("input.txt", "def main():\n");
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
        }
    }

    /// Number of characters (not bytes) in the document
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_count_counts_chars_not_bytes() {
        let doc = Document::new("x.txt", "héllo");
        assert_eq!(doc.char_count(), 5);
        assert_eq!(doc.text.len(), 6);
    }
}
