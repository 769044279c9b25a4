// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the three subcommands, `eval`, `suggest` and `init`,
// and all their configurable flags.
//
// --runs-dir can also come from the CHAR_RNN_RUNS_DIR
// environment variable; an explicit flag wins.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::eval_use_case::EvalConfig;
use crate::application::init_use_case::InitConfig;
use crate::application::suggest_use_case::SuggestConfig;
use crate::ml::backend::DeviceKind;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a run's greedy next-character predictions on a text
    Eval(EvalArgs),

    /// Greedily continue a prompt with a run's model
    Suggest(SuggestArgs),

    /// Create a run directory (vocabulary + untrained weights) from a corpus
    Init(InitArgs),
}

/// Burn backend to run the model on
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum DeviceArg {
    /// NdArray on the CPU
    #[default]
    Cpu,
    /// Wgpu on the default GPU adapter
    Wgpu,
}

impl From<DeviceArg> for DeviceKind {
    fn from(d: DeviceArg) -> Self {
        match d {
            DeviceArg::Cpu  => DeviceKind::Cpu,
            DeviceArg::Wgpu => DeviceKind::Wgpu,
        }
    }
}

/// Arguments for the `eval` command
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Run identifier (directory name under --runs-dir)
    #[arg(long = "run")]
    pub run_id: String,

    /// Directory holding one sub-directory per run
    #[arg(long, env = "CHAR_RNN_RUNS_DIR", default_value = "runs")]
    pub runs_dir: PathBuf,

    /// Evaluate this file instead of the run's validation split
    #[arg(long)]
    pub text_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = DeviceArg::Cpu)]
    pub device: DeviceArg,

    /// Print the transcript without ANSI styles (implied when stdout
    /// is not a terminal)
    #[arg(long)]
    pub plain: bool,
}

/// Convert CLI EvalArgs into the application-layer EvalConfig.
/// The application layer never sees clap types.
impl From<EvalArgs> for EvalConfig {
    fn from(a: EvalArgs) -> Self {
        EvalConfig {
            run_id:    a.run_id,
            runs_dir:  a.runs_dir,
            text_file: a.text_file,
            colored:   !a.plain,
            device:    a.device.into(),
        }
    }
}

/// Arguments for the `suggest` command
#[derive(Args, Debug)]
pub struct SuggestArgs {
    #[arg(long = "run")]
    pub run_id: String,

    #[arg(long, env = "CHAR_RNN_RUNS_DIR", default_value = "runs")]
    pub runs_dir: PathBuf,

    /// Text to feed the model before it starts generating
    #[arg(long)]
    pub prompt: String,

    /// Number of characters to generate
    #[arg(long, default_value_t = 80)]
    pub count: usize,

    #[arg(long, value_enum, default_value_t = DeviceArg::Cpu)]
    pub device: DeviceArg,
}

impl From<SuggestArgs> for SuggestConfig {
    fn from(a: SuggestArgs) -> Self {
        SuggestConfig {
            run_id:   a.run_id,
            runs_dir: a.runs_dir,
            prompt:   a.prompt,
            count:    a.count,
            device:   a.device.into(),
        }
    }
}

/// Arguments for the `init` command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// UTF-8 text file to take the vocabulary and validation split from
    #[arg(long)]
    pub corpus: PathBuf,

    #[arg(long, env = "CHAR_RNN_RUNS_DIR", default_value = "runs")]
    pub runs_dir: PathBuf,

    /// Run identifier; 32 hex digits from the clock when omitted
    #[arg(long)]
    pub run_id: Option<String>,

    /// Share of the corpus (tail, by characters) held out for `eval`
    #[arg(long, default_value_t = 0.1)]
    pub valid_fraction: f64,

    /// Character embedding width
    #[arg(long, default_value_t = 64)]
    pub d_embed: usize,

    /// LSTM hidden/cell width
    #[arg(long, default_value_t = 256)]
    pub d_hidden: usize,

    /// Number of stacked LSTM layers
    #[arg(long, default_value_t = 2)]
    pub num_layers: usize,

    /// Dropout between stacked layers (inactive during evaluation)
    #[arg(long, default_value_t = 0.2)]
    pub dropout: f64,

    #[arg(long, value_enum, default_value_t = DeviceArg::Cpu)]
    pub device: DeviceArg,
}

impl From<InitArgs> for InitConfig {
    fn from(a: InitArgs) -> Self {
        InitConfig {
            corpus:         a.corpus,
            runs_dir:       a.runs_dir,
            run_id:         a.run_id,
            valid_fraction: a.valid_fraction,
            d_embed:        a.d_embed,
            d_hidden:       a.d_hidden,
            num_layers:     a.num_layers,
            dropout:        a.dropout,
            device:         a.device.into(),
        }
    }
}
