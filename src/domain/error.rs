// ============================================================
// Layer 3 - Domain Errors
// ============================================================
// Every way an evaluation pass can fail on its own terms.
// Application code carries these inside anyhow::Error; callers
// that care about the kind use downcast_ref::<EvalError>().
//
// Two families:
//   - lookup failures: a symbol or index outside the vocabulary
//   - domain failures: input that cannot be scored at all

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The reference text contains a character the model never saw
    #[error("symbol {0:?} is not in the vocabulary")]
    UnknownSymbol(char),

    /// The model produced an index with no symbol behind it
    #[error("index {index} is outside the vocabulary of {size} symbols")]
    UnknownIndex { index: usize, size: usize },

    /// Vocabulary files must stay a bijection after a round trip
    #[error("vocabulary contains duplicate symbol {0:?}")]
    DuplicateSymbol(char),

    /// Fewer than two characters leaves nothing to predict
    #[error("reference text has {len} character(s); at least 2 are needed to score predictions")]
    DegenerateText { len: usize },

    #[error("model returned an empty distribution")]
    EmptyDistribution,

    #[error("cannot complete an empty prompt")]
    EmptyPrompt,
}
