// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `train` — trains the siamese encoder on a pair CSV
//   2. `check` — loads a checkpoint and scores one pair
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{CheckArgs, Commands, TrainArgs};

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "question-dup",
    version = "0.1.0",
    about = "Train a siamese character-level LSTM on question pairs, then check pairs for duplicates."
)]
pub struct Cli {
    /// The subcommand to run (train or check)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    /// This keeps the CLI layer thin — it only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => Self::run_train(args),
            Commands::Check(args) => Self::run_check(args),
        }
    }

    /// Handles the `train` subcommand.
    /// Converts CLI args into a TrainConfig and hands off to Layer 2.
    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("Starting training on pairs in: {}", args.train_csv);

        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Checkpoint saved.");
        Ok(())
    }

    /// Handles the `check` subcommand.
    /// Loads the model from checkpoint and prints the verdict.
    fn run_check(args: CheckArgs) -> Result<()> {
        use crate::application::check_use_case::CheckUseCase;

        let use_case = CheckUseCase::new(args.checkpoint_dir.clone())?;
        let verdict  = use_case.check(&args.question1, &args.question2)?;

        println!(
            "\nDistance: {:.4}\nVerdict:  {}",
            verdict.distance,
            if verdict.duplicate { "duplicate" } else { "not a duplicate" },
        );
        Ok(())
    }
}
