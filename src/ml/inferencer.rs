// ============================================================
// Layer 5 - Inferencer
// ============================================================
// Adapts the burn LSTM to the domain's SequenceModel trait so
// the predictor can drive it without seeing a tensor:
//
//   index ──► [[index]] ──► CharLstmModel::forward ──► logits
//                                   │                     │
//                             LstmHiddenState        softmax over
//                             (returned as-is)       the last position
//                                                         │
//                                                         ▼
//                                                     Vec<f32>

use anyhow::Result;
use burn::{prelude::*, tensor::activation::softmax};

use crate::domain::traits::SequenceModel;
use crate::infra::checkpoint::{RunConfig, RunStore};
use crate::ml::model::{CharLstmModel, LstmHiddenState};

pub struct LstmStepper<B: Backend> {
    model:  CharLstmModel<B>,
    device: B::Device,
}

impl<B: Backend> LstmStepper<B> {
    pub fn new(model: CharLstmModel<B>, device: B::Device) -> Self {
        Self { model, device }
    }

    /// Rebuild the model from an already loaded run config, then
    /// load its weights from the store.
    pub fn from_checkpoint(store: &RunStore, run: &RunConfig, device: B::Device) -> Result<Self> {
        let model = run.model.init::<B>(&device);
        let model = store.load_model(&run.run_id, model, &device)?;
        tracing::info!(
            "Model loaded: {} layers, d_hidden={}, vocab={}",
            run.model.num_layers, run.model.d_hidden, run.model.vocab_size,
        );
        Ok(Self::new(model, device))
    }
}

impl<B: Backend> SequenceModel for LstmStepper<B> {
    type State = LstmHiddenState<B>;

    fn step(&self, index: usize, state: Option<Self::State>) -> Result<(Vec<f32>, Self::State)> {
        let input = Tensor::<B, 2, Int>::from_data(
            TensorData::new(vec![index as i32], [1, 1]),
            &self.device,
        );
        let (logits, next_state) = self.model.forward(input, state);

        // Only the most recent position matters: [1, seq_len, vocab] → [vocab]
        let [_, seq_len, vocab] = logits.dims();
        let last = logits
            .slice([0..1, seq_len - 1..seq_len, 0..vocab])
            .reshape([vocab]);

        let probs: Vec<f32> = softmax(last, 0)
            .into_data()
            .to_vec()
            .map_err(|e| anyhow::anyhow!("Cannot read model output: {e:?}"))?;

        Ok((probs, next_state))
    }
}
