// ============================================================
// Layer 2 - Suggest Use Case
// ============================================================
// Loads a run's model and greedily continues a prompt, one
// character at a time, feeding each suggestion back in.

use anyhow::Result;
use burn::prelude::Backend;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::predictor::Predictor;
use crate::infra::checkpoint::RunStore;
use crate::ml::backend::{CpuBackend, DeviceKind, GpuBackend};
use crate::ml::inferencer::LstmStepper;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestConfig {
    pub run_id:   String,
    pub runs_dir: PathBuf,
    pub prompt:   String,
    /// Characters to generate after the prompt
    pub count:    usize,
    pub device:   DeviceKind,
}

pub struct SuggestUseCase {
    config: SuggestConfig,
}

impl SuggestUseCase {
    pub fn new(config: SuggestConfig) -> Self {
        Self { config }
    }

    /// Returns only the generated continuation
    pub fn execute(&self) -> Result<String> {
        match self.config.device {
            DeviceKind::Cpu  => self.run::<CpuBackend>(Default::default()),
            DeviceKind::Wgpu => self.run::<GpuBackend>(Default::default()),
        }
    }

    fn run<B: Backend>(&self, device: B::Device) -> Result<String> {
        let cfg   = &self.config;
        let store = RunStore::new(&cfg.runs_dir);
        let run   = store.load_config(&cfg.run_id)?;
        let vocab = store.load_vocab(&cfg.run_id)?;
        let model = LstmStepper::<B>::from_checkpoint(&store, &run, device)?;

        let completion = Predictor::new(&model, &vocab).complete(&cfg.prompt, cfg.count)?;
        tracing::debug!("Generated {} chars after a {}-char prompt",
            completion.chars().count(), cfg.prompt.chars().count());
        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init_use_case::{InitConfig, InitUseCase};
    use crate::domain::error::EvalError;
    use std::fs;

    fn scaffold(dir: &std::path::Path) -> SuggestConfig {
        let corpus = dir.join("corpus.txt");
        fs::write(&corpus, "to be or not to be\n").unwrap();
        InitUseCase::new(InitConfig {
            corpus,
            runs_dir:       dir.join("runs"),
            run_id:         Some("s1".to_string()),
            valid_fraction: 0.5,
            d_embed:        4,
            d_hidden:       8,
            num_layers:     1,
            dropout:        0.0,
            device:         DeviceKind::Cpu,
        })
        .execute()
        .unwrap();

        SuggestConfig {
            run_id:   "s1".to_string(),
            runs_dir: dir.join("runs"),
            prompt:   "to b".to_string(),
            count:    6,
            device:   DeviceKind::Cpu,
        }
    }

    #[test]
    fn test_suggest_is_deterministic_and_in_vocab() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = scaffold(dir.path());

        let a = SuggestUseCase::new(cfg.clone()).execute().unwrap();
        let b = SuggestUseCase::new(cfg).execute().unwrap();

        assert_eq!(a.chars().count(), 6);
        assert_eq!(a, b);
        assert!(a.chars().all(|c| "to bern\n".contains(c)));
    }

    #[test]
    fn test_suggest_rejects_prompt_outside_vocab() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = scaffold(dir.path());
        cfg.prompt = "xyz".to_string();

        let err = SuggestUseCase::new(cfg).execute().unwrap_err();
        assert_eq!(err.downcast_ref::<EvalError>(), Some(&EvalError::UnknownSymbol('x')));
    }
}
