// ============================================================
// Layer 2 - Predictor
// ============================================================
// Wraps a SequenceModel and a vocabulary, and keeps the model's
// hidden state between calls.
//
//   'a' ──stoi──► 3 ──step(3, state)──► [p0 .. pn], state'
//                                            │
//                                         argmax
//                                            │
//                              'b' ◄──itos── 7
//
// Every call depends on the state left behind by the previous
// one, so a Predictor drives exactly one sequence at a time.
// The state is moved into step() and the returned one replaces
// it; it is never shared.

use anyhow::Result;

use crate::domain::error::EvalError;
use crate::domain::traits::SequenceModel;
use crate::domain::vocabulary::Vocabulary;

pub struct Predictor<'a, M: SequenceModel> {
    model: &'a M,
    vocab: &'a Vocabulary,
    /// None until the first step: the model supplies its own default
    state: Option<M::State>,
}

impl<'a, M: SequenceModel> Predictor<'a, M> {
    pub fn new(model: &'a M, vocab: &'a Vocabulary) -> Self {
        Self { model, vocab, state: None }
    }

    /// Feed one symbol and return the model's distribution over
    /// the next symbol.
    pub fn get_predictions(&mut self, symbol: char) -> Result<Vec<f32>> {
        let index = self.vocab.index_of(symbol)?;
        let (prediction, state) = self.model.step(index, self.state.take())?;
        self.state = Some(state);
        Ok(prediction)
    }

    /// Feed one symbol and return the single most likely next one.
    pub fn get_suggestion(&mut self, symbol: char) -> Result<char> {
        let prediction = self.get_predictions(symbol)?;
        let best = argmax(&prediction).ok_or(EvalError::EmptyDistribution)?;
        Ok(self.vocab.symbol_at(best)?)
    }

    /// Forget the hidden state; the next call starts a new sequence.
    pub fn reset(&mut self) {
        self.state = None;
    }

    /// Greedy continuation: start a new sequence, feed the whole
    /// prompt, then keep feeding back the model's own suggestion
    /// `count` times. Returns only the generated characters.
    pub fn complete(&mut self, prompt: &str, count: usize) -> Result<String> {
        let mut chars = prompt.chars();
        let first = chars.next().ok_or(EvalError::EmptyPrompt)?;
        self.reset();

        let mut next = self.get_suggestion(first)?;
        for c in chars {
            next = self.get_suggestion(c)?;
        }

        let mut generated = String::with_capacity(count);
        for i in 0..count {
            generated.push(next);
            if i + 1 < count {
                next = self.get_suggestion(next)?;
            }
        }
        Ok(generated)
    }
}

/// Index of the largest score. Ties go to the lowest index and
/// NaN never wins; None only for an empty or all-NaN slice.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    best.map(|(i, _)| i)
}
