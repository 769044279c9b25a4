use burn::{
    nn::{
        Dropout, DropoutConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig, LstmState,
    },
    prelude::*,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally, so the config nests straight into RunConfig's JSON.
#[derive(Config, Debug)]
pub struct CharLstmConfig {
    pub vocab_size: usize,
    #[config(default = 64)]
    pub d_embed:    usize,
    #[config(default = 256)]
    pub d_hidden:   usize,
    #[config(default = 2)]
    pub num_layers: usize,
    #[config(default = 0.2)]
    pub dropout:    f64,
}

impl CharLstmConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> CharLstmModel<B> {
        let embedding = EmbeddingConfig::new(self.vocab_size, self.d_embed).init(device);
        let layers: Vec<Lstm<B>> = (0..self.num_layers)
            .map(|i| {
                let d_input = if i == 0 { self.d_embed } else { self.d_hidden };
                LstmConfig::new(d_input, self.d_hidden, true).init(device)
            })
            .collect();
        let output  = LinearConfig::new(self.d_hidden, self.vocab_size).init(device);
        let dropout = DropoutConfig::new(self.dropout).init();
        CharLstmModel { embedding, layers, output, dropout, d_hidden: self.d_hidden }
    }
}

/// Recurrent memory for every layer, stacked on the first axis.
///
/// cell, hidden: [num_layers, batch, d_hidden]
#[derive(Debug, Clone)]
pub struct LstmHiddenState<B: Backend> {
    pub cell:   Tensor<B, 3>,
    pub hidden: Tensor<B, 3>,
}

impl<B: Backend> LstmHiddenState<B> {
    /// The single-layer state burn's Lstm expects, [batch, d_hidden]
    fn layer(&self, index: usize) -> LstmState<B, 2> {
        let [_, batch, d_hidden] = self.cell.dims();
        let pick = |t: &Tensor<B, 3>| {
            t.clone()
                .slice([index..index + 1, 0..batch, 0..d_hidden])
                .reshape([batch, d_hidden])
        };
        LstmState::new(pick(&self.cell), pick(&self.hidden))
    }

    fn from_layers(states: Vec<LstmState<B, 2>>) -> Self {
        let (cells, hiddens): (Vec<_>, Vec<_>) =
            states.into_iter().map(|s| (s.cell, s.hidden)).unzip();
        Self {
            cell:   Tensor::stack::<3>(cells, 0),
            hidden: Tensor::stack::<3>(hiddens, 0),
        }
    }
}

#[derive(Module, Debug)]
pub struct CharLstmModel<B: Backend> {
    pub embedding: Embedding<B>,
    pub layers:    Vec<Lstm<B>>,
    pub output:    Linear<B>,
    pub dropout:   Dropout,
    pub d_hidden:  usize,
}

impl<B: Backend> CharLstmModel<B> {
    /// input_ids: [batch, seq_len] → logits: [batch, seq_len, vocab_size]
    ///
    /// A None state starts every layer from zeros.
    pub fn forward(
        &self,
        input_ids: Tensor<B, 2, Int>,
        state:     Option<LstmHiddenState<B>>,
    ) -> (Tensor<B, 3>, LstmHiddenState<B>) {
        let mut x = self.embedding.forward(input_ids); // [batch, seq_len, d_embed]
        let last = self.layers.len().saturating_sub(1);

        let mut next_states = Vec::with_capacity(self.layers.len());
        for (i, layer) in self.layers.iter().enumerate() {
            let layer_state = state.as_ref().map(|s| s.layer(i));
            let (out, next) = layer.forward(x, layer_state);
            next_states.push(next);
            // Dropout between stacked layers only
            x = if i < last { self.dropout.forward(out) } else { out };
        }

        let logits = self.output.forward(x);
        (logits, LstmHiddenState::from_layers(next_states))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type B = NdArray;

    fn small_config() -> CharLstmConfig {
        CharLstmConfig::new(7)
            .with_d_embed(4)
            .with_d_hidden(8)
            .with_num_layers(2)
            .with_dropout(0.0)
    }

    #[test]
    fn test_forward_shapes() {
        let device = Default::default();
        let model = small_config().init::<B>(&device);

        let input = Tensor::<B, 2, Int>::zeros([1, 3], &device);
        let (logits, state) = model.forward(input, None);

        assert_eq!(logits.dims(), [1, 3, 7]);
        assert_eq!(state.cell.dims(), [2, 1, 8]);
        assert_eq!(state.hidden.dims(), [2, 1, 8]);
    }

    #[test]
    fn test_state_carries_across_calls() {
        let device = Default::default();
        let model = small_config().init::<B>(&device);

        // Feeding "0 1" in one call must match feeding "0" then "1"
        // with the returned state.
        let both = Tensor::<B, 2, Int>::from_data(TensorData::new(vec![0i32, 1], [1, 2]), &device);
        let (full, _) = model.forward(both, None);
        let full_last = full.slice([0..1, 1..2, 0..7]);

        let first = Tensor::<B, 2, Int>::from_data(TensorData::new(vec![0i32], [1, 1]), &device);
        let second = Tensor::<B, 2, Int>::from_data(TensorData::new(vec![1i32], [1, 1]), &device);
        let (_, state) = model.forward(first, None);
        let (stepped, _) = model.forward(second, Some(state));

        let expected: Vec<f32> = full_last.into_data().to_vec().unwrap();
        let actual: Vec<f32> = stepped.into_data().to_vec().unwrap();
        for (e, a) in expected.iter().zip(&actual) {
            assert!((e - a).abs() < 1e-5, "{e} vs {a}");
        }
    }

    #[test]
    fn test_config_json_round_trip() {
        let cfg = small_config();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: CharLstmConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.vocab_size, 7);
        assert_eq!(back.d_hidden, 8);
    }
}
