// ============================================================
// Layer 3 - Vocabulary
// ============================================================
// A bijection between characters and dense integer indices.
//
//   stoi: char  -> index   (feeding the model)
//   itos: index -> char    (reading its prediction back)
//
// The vocabulary is immutable once built. On disk it is just
// the itos list in index order:
//
//   ["\n", " ", "a", "b", ...]
//
// and deserialising rebuilds stoi, refusing duplicates so the
// mapping stays a bijection.
//
// Reference: Rust Book §8 (HashMap), serde "try_from" attribute

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::error::EvalError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<char>", into = "Vec<char>")]
pub struct Vocabulary {
    itos: Vec<char>,
    stoi: HashMap<char, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from an ordered list of distinct symbols.
    /// Index i maps to symbols[i].
    pub fn from_symbols(symbols: Vec<char>) -> Result<Self, EvalError> {
        let mut stoi = HashMap::with_capacity(symbols.len());
        for (index, &symbol) in symbols.iter().enumerate() {
            if stoi.insert(symbol, index).is_some() {
                return Err(EvalError::DuplicateSymbol(symbol));
            }
        }
        Ok(Self { itos: symbols, stoi })
    }

    /// Build a vocabulary from every distinct character in `text`,
    /// sorted so the same corpus always yields the same indices.
    pub fn from_text(text: &str) -> Self {
        let symbols: BTreeSet<char> = text.chars().collect();
        let itos: Vec<char> = symbols.into_iter().collect();
        let stoi = itos.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { itos, stoi }
    }

    pub fn index_of(&self, symbol: char) -> Result<usize, EvalError> {
        self.stoi
            .get(&symbol)
            .copied()
            .ok_or(EvalError::UnknownSymbol(symbol))
    }

    pub fn symbol_at(&self, index: usize) -> Result<char, EvalError> {
        self.itos.get(index).copied().ok_or(EvalError::UnknownIndex {
            index,
            size: self.itos.len(),
        })
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.stoi.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.itos.len()
    }

}

impl TryFrom<Vec<char>> for Vocabulary {
    type Error = EvalError;

    fn try_from(symbols: Vec<char>) -> Result<Self, Self::Error> {
        Self::from_symbols(symbols)
    }
}

impl From<Vocabulary> for Vec<char> {
    fn from(vocab: Vocabulary) -> Self {
        vocab.itos
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_is_sorted_and_distinct() {
        let vocab = Vocabulary::from_text("cabba\n");
        assert_eq!(Vec::<char>::from(vocab.clone()), &['\n', 'a', 'b', 'c']);
        assert_eq!(vocab.index_of('a'), Ok(1));
        assert_eq!(vocab.symbol_at(3), Ok('c'));
    }

    #[test]
    fn test_unknown_symbol_is_lookup_error() {
        let vocab = Vocabulary::from_text("ab");
        let err = vocab.index_of('z').unwrap_err();
        assert_eq!(err, EvalError::UnknownSymbol('z'));
    }

    #[test]
    fn test_unknown_index_reports_size() {
        let vocab = Vocabulary::from_text("ab");
        assert_eq!(
            vocab.symbol_at(5),
            Err(EvalError::UnknownIndex { index: 5, size: 2 })
        );
    }

    #[test]
    fn test_duplicate_symbols_rejected() {
        let err = Vocabulary::from_symbols(vec!['a', 'b', 'a']).unwrap_err();
        assert_eq!(err, EvalError::DuplicateSymbol('a'));
    }

    #[test]
    fn test_json_keeps_index_order() {
        let vocab = Vocabulary::from_symbols(vec!['z', '\r', 'a']).unwrap();
        let json = serde_json::to_string(&vocab).unwrap();
        assert_eq!(json, r#"["z","\r","a"]"#);

        let back: Vocabulary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vocab);
        assert_eq!(back.index_of('\r'), Ok(1));
    }

    #[test]
    fn test_json_with_duplicates_fails() {
        let result: Result<Vocabulary, _> = serde_json::from_str(r#"["a","a"]"#);
        assert!(result.is_err());
    }
}
