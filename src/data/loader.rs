// ============================================================
// Layer 4 - Corpus Loader
// ============================================================
// Reads a plain UTF-8 text file into a Document.
//
// The text is NOT normalised: Windows line endings stay as
// "\r\n" because the evaluator skips '\r' explicitly, and a
// vocabulary built from the raw text must contain every
// character the model will be fed.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (Reading a File)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::domain::document::Document;
use crate::domain::traits::CorpusSource;

/// Loads a single text file from disk.
/// Implements the CorpusSource trait from Layer 3.
pub struct TextFileLoader {
    path: PathBuf,
}

impl TextFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CorpusSource for TextFileLoader {
    fn load(&self) -> Result<Document> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Cannot read corpus '{}'", self.path.display()))?;

        let doc = Document::new(self.path.display().to_string(), text);
        tracing::debug!("Loaded: {} ({} chars)", doc.source, doc.char_count());
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_text_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.txt");
        fs::write(&path, "line one\r\nline two\n").unwrap();

        let doc = TextFileLoader::new(&path).load().unwrap();
        assert_eq!(doc.text, "line one\r\nline two\n");
        assert!(doc.source.ends_with("corpus.txt"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = TextFileLoader::new("/definitely/not/here.txt").load().unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
