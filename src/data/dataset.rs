// ============================================================
// Layer 4 - Text Dataset
// ============================================================
// The dataset an evaluation run needs: the vocabulary the model
// was built with, plus the corpus split into a training part
// and a held-out validation part. The validation text is what
// the evaluator scores by default.

use anyhow::Result;

use crate::data::splitter::split_text;
use crate::domain::error::EvalError;
use crate::domain::vocabulary::Vocabulary;

#[derive(Debug, Clone)]
pub struct TextDataset {
    pub vocab: Vocabulary,
    pub train: String,
    pub valid: String,
}

impl TextDataset {
    /// Build the vocabulary from the whole corpus, then split.
    /// Used when a run is first created.
    pub fn from_corpus(text: &str, valid_fraction: f64) -> Self {
        let vocab = Vocabulary::from_text(text);
        let (train, valid) = split_text(text, valid_fraction);
        Self { vocab, train, valid }
    }

    /// Split a corpus against a vocabulary saved with a run.
    ///
    /// Fails with EvalError::UnknownSymbol if the corpus has
    /// changed since the run was created and now contains a
    /// character the model cannot be fed.
    pub fn with_vocab(vocab: Vocabulary, text: &str, valid_fraction: f64) -> Result<Self> {
        if let Some(unknown) = text.chars().find(|c| !vocab.contains(*c)) {
            return Err(EvalError::UnknownSymbol(unknown).into());
        }
        let (train, valid) = split_text(text, valid_fraction);
        Ok(Self { vocab, train, valid })
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }
}
