// ============================================================
// Layer 6 - Evaluation Metrics Logger
// ============================================================
// Appends one CSV row per evaluation pass to the run directory,
// so accuracy can be compared across texts and over time.
//
// Output file: runs/<run_id>/eval_metrics.csv
//
// Example CSV output:
//   timestamp,source,chars,correct,accuracy
//   1760611200,runs/corpus.txt#valid,20481,11377,0.555490
//   1760611320,notes.txt,913,402,0.440789
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};
use serde::{Deserialize, Serialize};

const HEADER: &str = "timestamp,source,chars,correct,accuracy";

/// Seconds since the unix epoch (0 if the clock is before it)
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// One row of metrics data for a single evaluation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalMetrics {
    /// Seconds since the unix epoch
    pub timestamp: u64,

    /// Where the reference text came from
    pub source: String,

    /// Characters in the reference text
    pub chars: usize,

    /// Positions where the greedy prediction matched
    pub correct: usize,

    /// correct / (chars - 1), range [0.0, 1.0]
    pub accuracy: f64,
}

impl EvalMetrics {
    pub fn new(
        timestamp: u64,
        source:    impl Into<String>,
        chars:     usize,
        correct:   usize,
        accuracy:  f64,
    ) -> Self {
        Self { timestamp, source: source.into(), chars, correct, accuracy }
    }

    fn csv_row(&self) -> String {
        // Commas in a path would shift the columns
        let source = self.source.replace(',', ";");
        format!(
            "{},{},{},{},{:.6}",
            self.timestamp, source, self.chars, self.correct, self.accuracy,
        )
    }
}

/// Logs evaluation metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger writing into `dir`.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join("eval_metrics.csv");

        // Header only for a new file, so runs append to one log
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one pass's metrics as a new row
    pub fn log(&self, m: &EvalMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(f, "{}", m.csv_row())?;

        tracing::debug!(
            "Logged metrics for '{}': accuracy={:.4}",
            m.source,
            m.accuracy,
        );
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_append_under_single_header() {
        let dir = tempfile::tempdir().unwrap();

        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EvalMetrics::new(1, "a.txt", 5, 2, 0.5)).unwrap();

        // A second logger on the same dir must not rewrite the header
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EvalMetrics::new(2, "b,c.txt", 3, 2, 1.0)).unwrap();

        let csv = fs::read_to_string(dir.path().join("eval_metrics.csv")).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec![
            HEADER,
            "1,a.txt,5,2,0.500000",
            "2,b;c.txt,3,2,1.000000",
        ]);
    }
}
