// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and hands everything else to Layer 2.
//
//   1. `eval`    - score a run on its held-out text (or a file)
//   2. `suggest` - continue a prompt with a run's model
//   3. `init`    - scaffold a run from a corpus
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvalArgs, InitArgs, SuggestArgs};

#[derive(Parser, Debug)]
#[command(
    name = "char-rnn-eval",
    version,
    about = "Score a character-level LSTM's greedy next-character predictions on a text."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Eval(args)    => run_eval(args),
            Commands::Suggest(args) => run_suggest(args),
            Commands::Init(args)    => run_init(args),
        }
    }
}

fn run_eval(args: EvalArgs) -> Result<()> {
    use crate::application::eval_use_case::EvalUseCase;

    tracing::info!("Evaluating run {}", args.run_id);

    // The transcript and accuracy line are printed by the use case
    let report = EvalUseCase::new(args.into()).execute()?;
    tracing::info!(
        "Accuracy {:.4} ({} / {}) over {} lines in {:.2?}",
        report.accuracy, report.correct, report.scored, report.lines, report.elapsed,
    );
    Ok(())
}

fn run_suggest(args: SuggestArgs) -> Result<()> {
    use crate::application::suggest_use_case::SuggestUseCase;

    let prompt = args.prompt.clone();
    let completion = SuggestUseCase::new(args.into()).execute()?;
    println!("{prompt}{completion}");
    Ok(())
}

fn run_init(args: InitArgs) -> Result<()> {
    use crate::application::init_use_case::InitUseCase;

    let run = InitUseCase::new(args.into()).execute()?;
    println!("Created run {}", run.run_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::eval_use_case::EvalConfig;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_eval_args_convert_to_config() {
        let cli = Cli::try_parse_from([
            "char-rnn-eval", "eval",
            "--run", "9c8c24fae75c11ea8e22551c650c3796",
            "--runs-dir", "/tmp/runs",
            "--plain",
        ])
        .unwrap();

        let Commands::Eval(args) = cli.command else { panic!("expected eval") };
        let cfg: EvalConfig = args.into();
        assert_eq!(cfg.run_id, "9c8c24fae75c11ea8e22551c650c3796");
        assert_eq!(cfg.runs_dir, std::path::PathBuf::from("/tmp/runs"));
        assert!(!cfg.colored);
        assert!(cfg.text_file.is_none());
    }

    #[test]
    fn test_suggest_requires_prompt() {
        let result = Cli::try_parse_from(["char-rnn-eval", "suggest", "--run", "x"]);
        assert!(result.is_err());
    }
}
