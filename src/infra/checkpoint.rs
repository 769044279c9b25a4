// ============================================================
// Layer 6 - Run Store (Checkpoints)
// ============================================================
// Resolves a run identifier to everything needed to rebuild a
// trained model: its configuration, its vocabulary and its
// weights.
//
// Directory layout:
//   runs/
//     9c8c24fae75c11ea8e22551c650c3796/
//       run.json          ← RunConfig (corpus, split, model config)
//       vocab.json        ← vocabulary symbols in index order
//       model.mpk.gz      ← weights (Burn CompactRecorder)
//       eval_metrics.csv  ← appended by every `eval`
//
// Why save the config separately?
//   To load weights, Burn needs a model with the exact same
//   architecture first. run.json carries the CharLstmConfig used
//   to build it, so load_model() is always called on a model
//   produced by cfg.model.init().
//
// Burn's CompactRecorder:
//   - Serialises parameters to MessagePack, half precision
//   - Compresses with gzip
//   - Type-safe: loading fails if architecture doesn't match
//
// Reference: Burn Book §5 (Records and Checkpointing)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::{Path, PathBuf}};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use serde::{Deserialize, Serialize};

use crate::domain::vocabulary::Vocabulary;
use crate::ml::model::{CharLstmConfig, CharLstmModel};

const CONFIG_FILE: &str = "run.json";
const VOCAB_FILE:  &str = "vocab.json";
const MODEL_STEM:  &str = "model";

/// Everything recorded about a run when it is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub run_id:         String,
    /// Corpus the vocabulary and splits were taken from
    pub corpus_path:    PathBuf,
    /// Share of the corpus (by characters) held out for evaluation
    pub valid_fraction: f64,
    /// Seconds since the unix epoch
    pub created_at:     u64,
    pub model:          CharLstmConfig,
}

/// Manages run directories under a common root.
pub struct RunStore {
    /// Root directory holding one sub-directory per run
    root: PathBuf,
}

impl RunStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        self.root.join(run_id)
    }

    pub fn exists(&self, run_id: &str) -> bool {
        self.run_dir(run_id).join(CONFIG_FILE).is_file()
    }

    /// Write run.json, creating the run directory if needed.
    pub fn save_config(&self, cfg: &RunConfig) -> Result<()> {
        let dir = self.run_dir(&cfg.run_id);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create run directory '{}'", dir.display()))?;

        let path = dir.join(CONFIG_FILE);
        fs::write(&path, serde_json::to_string_pretty(cfg)?)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved run config to '{}'", path.display());
        Ok(())
    }

    pub fn load_config(&self, run_id: &str) -> Result<RunConfig> {
        let path = self.run_dir(run_id).join(CONFIG_FILE);
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot find run '{}' (no '{}'). Check --run and --runs-dir.",
                run_id,
                path.display()
            )
        })?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed run config '{}'", path.display()))
    }

    pub fn save_vocab(&self, run_id: &str, vocab: &Vocabulary) -> Result<()> {
        let path = self.run_dir(run_id).join(VOCAB_FILE);
        fs::write(&path, serde_json::to_string(vocab)?)
            .with_context(|| format!("Cannot write vocabulary to '{}'", path.display()))?;
        Ok(())
    }

    pub fn load_vocab(&self, run_id: &str) -> Result<Vocabulary> {
        let path = self.run_dir(run_id).join(VOCAB_FILE);
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read vocabulary '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed vocabulary '{}'", path.display()))
    }

    /// Save model weights.
    ///
    /// CompactRecorder appends the .mpk.gz extension itself.
    pub fn save_model<B: Backend>(&self, run_id: &str, model: &CharLstmModel<B>) -> Result<()> {
        let path = self.run_dir(run_id).join(MODEL_STEM);

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save weights to '{}'", path.display()))?;

        tracing::debug!("Saved weights for run {}", run_id);
        Ok(())
    }

    /// Load weights into a model built from the run's own config.
    pub fn load_model<B: Backend>(
        &self,
        run_id: &str,
        model:  CharLstmModel<B>,
        device: &B::Device,
    ) -> Result<CharLstmModel<B>> {
        let path = self.run_dir(run_id).join(MODEL_STEM);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| format!("Cannot load weights '{}.mpk.gz'", path.display()))?;

        Ok(model.load_record(record))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::inferencer::LstmStepper;
    use crate::domain::traits::SequenceModel;
    use burn::backend::NdArray;

    type B = NdArray;

    fn config(run_id: &str, vocab_size: usize) -> RunConfig {
        RunConfig {
            run_id:         run_id.to_string(),
            corpus_path:    PathBuf::from("corpus.txt"),
            valid_fraction: 0.1,
            created_at:     0,
            model: CharLstmConfig::new(vocab_size)
                .with_d_embed(4)
                .with_d_hidden(8)
                .with_num_layers(1),
        }
    }

    #[test]
    fn test_config_and_vocab_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = RunStore::new(dir.path());
        let vocab = Vocabulary::from_text("ab\r\n");

        store.save_config(&config("run1", vocab.len())).unwrap();
        store.save_vocab("run1", &vocab).unwrap();

        let cfg = store.load_config("run1").unwrap();
        assert_eq!(cfg.run_id, "run1");
        assert_eq!(cfg.model.vocab_size, 4);
        assert_eq!(store.load_vocab("run1").unwrap(), vocab);
        assert!(store.exists("run1"));
    }

    #[test]
    fn test_missing_run_names_run_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = RunStore::new(dir.path());
        let err = store.load_config("nope").unwrap_err();
        assert!(err.to_string().contains("nope"));
        assert!(!store.exists("nope"));
    }

    #[test]
    fn test_weights_round_trip_through_stepper() {
        let dir = tempfile::tempdir().unwrap();
        let store = RunStore::new(dir.path());
        let device = Default::default();

        let cfg = config("w", 6);
        store.save_config(&cfg).unwrap();
        let model = cfg.model.init::<B>(&device);
        store.save_model("w", &model).unwrap();

        let original = LstmStepper::new(model, device.clone());
        let loaded = LstmStepper::<B>::from_checkpoint(&store, &cfg, device).unwrap();

        let (a, _) = original.step(2, None).unwrap();
        let (b, _) = loaded.step(2, None).unwrap();
        // CompactRecorder stores half precision
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-2);
        }
    }
}
