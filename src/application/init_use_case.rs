// ============================================================
// Layer 2 - InitUseCase
// ============================================================
// Scaffolds a run directory from a corpus so the evaluation
// path can be exercised end to end:
//
//   Step 1: Load the corpus            (Layer 4 - data)
//   Step 2: Build vocabulary + split   (Layer 4 - data)
//   Step 3: Pick / check the run id    (Layer 6 - infra)
//   Step 4: Build the model            (Layer 5 - ml)
//   Step 5: Save config, vocab, weights (Layer 6 - infra)
//
// The weights are freshly initialised, NOT trained. An untrained
// model scores near chance; real runs get their weights from a
// training job that writes the same directory layout.

use anyhow::{bail, Result};
use burn::prelude::Backend;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::data::{dataset::TextDataset, loader::TextFileLoader};
use crate::domain::traits::CorpusSource;
use crate::infra::checkpoint::{RunConfig, RunStore};
use crate::infra::metrics::unix_now;
use crate::ml::backend::{CpuBackend, DeviceKind, GpuBackend};
use crate::ml::model::CharLstmConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitConfig {
    pub corpus:         PathBuf,
    pub runs_dir:       PathBuf,
    /// Generated from the clock when absent
    pub run_id:         Option<String>,
    pub valid_fraction: f64,
    pub d_embed:        usize,
    pub d_hidden:       usize,
    pub num_layers:     usize,
    pub dropout:        f64,
    pub device:         DeviceKind,
}

impl InitConfig {
    fn validate(&self) -> Result<()> {
        if !(self.valid_fraction > 0.0 && self.valid_fraction <= 1.0) {
            bail!("valid fraction must be in (0, 1], got {}", self.valid_fraction);
        }
        if self.num_layers == 0 || self.d_embed == 0 || self.d_hidden == 0 {
            bail!("model needs at least one layer and non-zero widths");
        }
        if !(0.0..1.0).contains(&self.dropout) {
            bail!("dropout must be in [0, 1), got {}", self.dropout);
        }
        Ok(())
    }
}

pub struct InitUseCase {
    config: InitConfig,
}

impl InitUseCase {
    pub fn new(config: InitConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<RunConfig> {
        match self.config.device {
            DeviceKind::Cpu  => self.run::<CpuBackend>(Default::default()),
            DeviceKind::Wgpu => self.run::<GpuBackend>(Default::default()),
        }
    }

    fn run<B: Backend>(&self, device: B::Device) -> Result<RunConfig> {
        let cfg = &self.config;
        cfg.validate()?;

        // ── Step 1: Load the corpus ───────────────────────────────────────────
        let doc = TextFileLoader::new(&cfg.corpus).load()?;
        if doc.text.is_empty() {
            bail!("corpus '{}' is empty", doc.source);
        }

        // ── Step 2: Vocabulary from the whole corpus, then split ──────────────
        let dataset = TextDataset::from_corpus(&doc.text, cfg.valid_fraction);
        let valid_chars = dataset.valid.chars().count();
        tracing::info!(
            "Vocabulary: {} symbols, train text: {} chars, validation text: {} chars",
            dataset.vocab_size(),
            dataset.train.chars().count(),
            valid_chars,
        );
        if valid_chars < 2 {
            tracing::warn!("Validation text is too short to evaluate; raise --valid-fraction");
        }

        // ── Step 3: Run id ────────────────────────────────────────────────────
        let store  = RunStore::new(&cfg.runs_dir);
        let run_id = cfg.run_id.clone().unwrap_or_else(generate_run_id);
        if store.exists(&run_id) {
            bail!("run '{}' already exists in '{}'", run_id, store.root().display());
        }

        // ── Step 4: Build the model ───────────────────────────────────────────
        let model_cfg = CharLstmConfig::new(dataset.vocab_size())
            .with_d_embed(cfg.d_embed)
            .with_d_hidden(cfg.d_hidden)
            .with_num_layers(cfg.num_layers)
            .with_dropout(cfg.dropout);
        let model = model_cfg.init::<B>(&device);

        // ── Step 5: Persist ───────────────────────────────────────────────────
        let run = RunConfig {
            run_id:         run_id.clone(),
            corpus_path:    cfg.corpus.clone(),
            valid_fraction: cfg.valid_fraction,
            created_at:     unix_now(),
            model:          model_cfg,
        };
        store.save_config(&run)?;
        store.save_vocab(&run_id, &dataset.vocab)?;
        store.save_model(&run_id, &model)?;

        tracing::info!("Run {} written to '{}'", run_id, store.run_dir(&run_id).display());
        Ok(run)
    }
}

/// 32 hex digits from the clock, the same shape as a uuid4 hex
fn generate_run_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{nanos:032x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn config(dir: &std::path::Path, corpus: &str) -> InitConfig {
        let corpus_path = dir.join("corpus.txt");
        fs::write(&corpus_path, corpus).unwrap();
        InitConfig {
            corpus:         corpus_path,
            runs_dir:       dir.join("runs"),
            run_id:         Some("test-run".to_string()),
            valid_fraction: 0.5,
            d_embed:        4,
            d_hidden:       8,
            num_layers:     1,
            dropout:        0.0,
            device:         DeviceKind::Cpu,
        }
    }

    #[test]
    fn test_init_writes_complete_run() {
        let dir = tempfile::tempdir().unwrap();
        let run = InitUseCase::new(config(dir.path(), "abc\nabd\n")).execute().unwrap();

        assert_eq!(run.run_id, "test-run");
        assert_eq!(run.model.vocab_size, 5);

        let store = RunStore::new(dir.path().join("runs"));
        assert!(store.exists("test-run"));
        assert_eq!(store.load_vocab("test-run").unwrap().len(), 5);
        assert!(store.run_dir("test-run").join("model.mpk.gz").is_file());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), "hello\nworld\n");
        InitUseCase::new(cfg.clone()).execute().unwrap();

        let err = InitUseCase::new(cfg).execute().unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_init_rejects_bad_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), "hello");
        cfg.valid_fraction = 0.0;
        assert!(InitUseCase::new(cfg.clone()).execute().is_err());

        cfg.valid_fraction = 0.5;
        cfg.num_layers = 0;
        assert!(InitUseCase::new(cfg).execute().is_err());
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = InitUseCase::new(config(dir.path(), "")).execute().unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_generated_run_id_shape() {
        let id = generate_run_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
