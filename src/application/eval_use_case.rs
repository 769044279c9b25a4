// ============================================================
// Layer 2 - Eval Use Case
// ============================================================
// Resolves a run and scores its model on a reference text:
//
//   1. Load run.json and vocab.json for the run id
//   2. Pick the reference text: --text-file if given, else the
//      held-out tail of the run's corpus
//   3. Rebuild the model and load its weights
//   4. Evaluator → transcript on stdout, EvalReport back
//   5. Append the result to the run's eval_metrics.csv
//
// The run is resolved here and handed to the Evaluator by
// reference; nothing below this layer knows about run ids.

use anyhow::{bail, Result};
use burn::prelude::Backend;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::evaluator::{EvalReport, Evaluator};
use crate::data::{dataset::TextDataset, loader::TextFileLoader};
use crate::domain::traits::{CorpusSource, LogSink};
use crate::domain::vocabulary::Vocabulary;
use crate::infra::checkpoint::{RunConfig, RunStore};
use crate::infra::log_sink::TerminalSink;
use crate::infra::metrics::{unix_now, EvalMetrics, MetricsLogger};
use crate::ml::backend::{CpuBackend, DeviceKind, GpuBackend};
use crate::ml::inferencer::LstmStepper;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    pub run_id:    String,
    pub runs_dir:  PathBuf,
    /// Score this file instead of the run's validation split
    pub text_file: Option<PathBuf>,
    pub colored:   bool,
    pub device:    DeviceKind,
}

pub struct EvalUseCase {
    config: EvalConfig,
    store:  RunStore,
}

impl EvalUseCase {
    pub fn new(config: EvalConfig) -> Self {
        let store = RunStore::new(&config.runs_dir);
        Self { config, store }
    }

    /// Evaluate with the transcript going to stdout
    pub fn execute(&self) -> Result<EvalReport> {
        let mut sink = TerminalSink::stdout(self.config.colored);
        self.execute_with_sink(&mut sink)
    }

    pub fn execute_with_sink(&self, sink: &mut dyn LogSink) -> Result<EvalReport> {
        match self.config.device {
            DeviceKind::Cpu  => self.run::<CpuBackend>(Default::default(), sink),
            DeviceKind::Wgpu => self.run::<GpuBackend>(Default::default(), sink),
        }
    }

    fn run<B: Backend>(&self, device: B::Device, sink: &mut dyn LogSink) -> Result<EvalReport> {
        let run_id = &self.config.run_id;
        let run    = self.store.load_config(run_id)?;
        let vocab  = self.store.load_vocab(run_id)?;
        if vocab.len() != run.model.vocab_size {
            bail!(
                "run '{}' is inconsistent: vocab.json has {} symbols, model expects {}",
                run_id, vocab.len(), run.model.vocab_size,
            );
        }
        tracing::info!("Resolved run {} on {}", run_id, self.config.device);

        let (source, text) = self.reference_text(&run, &vocab)?;
        tracing::info!("Evaluating '{}' ({} chars)", source, text.chars().count());

        let model  = LstmStepper::<B>::from_checkpoint(&self.store, &run, device)?;
        let report = Evaluator::new(&model, &vocab, &text).eval(sink)?;

        let metrics = MetricsLogger::new(self.store.run_dir(run_id))?;
        metrics.log(&EvalMetrics::new(
            unix_now(),
            source,
            report.scored + 1,
            report.correct,
            report.accuracy,
        ))?;

        Ok(report)
    }

    /// (source label, text) for the pass
    fn reference_text(&self, run: &RunConfig, vocab: &Vocabulary) -> Result<(String, String)> {
        match &self.config.text_file {
            Some(path) => {
                let doc = TextFileLoader::new(path).load()?;
                Ok((doc.source, doc.text))
            }
            None => {
                let doc = TextFileLoader::new(&run.corpus_path).load()?;
                let dataset = TextDataset::with_vocab(vocab.clone(), &doc.text, run.valid_fraction)?;
                Ok((format!("{}#valid", doc.source), dataset.valid))
            }
        }
    }
}
