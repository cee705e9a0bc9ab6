// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands: `train` and `check`
// and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::train_use_case::TrainConfig;
use crate::ml::encoder::EncoderKind;

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the siamese encoder on a question pair CSV
    Train(TrainArgs),

    /// Check one question pair using a trained checkpoint
    Check(CheckArgs),
}

/// CLI-facing encoder selection.
/// Kept separate from the ml layer's EncoderKind so clap types
/// never leak past Layer 1.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum EncoderArg {
    /// Single-direction, single-layer LSTM
    Rnn,
    /// Bidirectional, single-layer LSTM
    Birnn,
    /// Stacked bidirectional LSTM (--n-layers deep)
    StackedBirnn,
}

impl From<EncoderArg> for EncoderKind {
    fn from(a: EncoderArg) -> Self {
        match a {
            EncoderArg::Rnn          => EncoderKind::Rnn,
            EncoderArg::Birnn        => EncoderKind::BiRnn,
            EncoderArg::StackedBirnn => EncoderKind::StackedBiRnn,
        }
    }
}

/// All arguments for the `train` command.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV file with question1, question2, is_duplicate columns
    #[arg(long, default_value = "data/train.csv")]
    pub train_csv: String,

    /// Directory to save model checkpoints and the metrics log
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,

    /// Fixed number of character indices per encoded question
    /// (also the one-hot width, so it must be at least 38)
    #[arg(long, default_value_t = 80)]
    pub embedding_dim: usize,

    /// Rows drawn into the training partition
    #[arg(long, default_value_t = 400_000)]
    pub n_train_samples: usize,

    /// Rows drawn into the validation partition
    #[arg(long, default_value_t = 10_000)]
    pub n_validation_samples: usize,

    /// Number of pairs processed together in one step
    #[arg(long, default_value_t = 128)]
    pub batch_size: usize,

    /// Number of full passes through the training partition
    #[arg(long, default_value_t = 5)]
    pub epochs: usize,

    /// Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Hidden size of each LSTM cell
    #[arg(long, default_value_t = 128)]
    pub lstm_size: usize,

    /// Stacked layers per direction (stacked-birnn encoder only)
    #[arg(long, default_value_t = 2)]
    pub n_layers: usize,

    /// Distance beyond which non-duplicate pairs stop being penalised
    #[arg(long, default_value_t = 10.0)]
    pub margin: f32,

    /// Which recurrent variant to train
    #[arg(long, value_enum, default_value_t = EncoderArg::Birnn)]
    pub encoder: EncoderArg,

    /// Seed for the train/validation subsampling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Convert CLI TrainArgs into the application-layer TrainConfig.
/// This is the boundary between Layer 1 and Layer 2 —
/// the application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            train_csv:            a.train_csv,
            checkpoint_dir:       a.checkpoint_dir,
            embedding_dim:        a.embedding_dim,
            n_train_samples:      a.n_train_samples,
            n_validation_samples: a.n_validation_samples,
            batch_size:           a.batch_size,
            epochs:               a.epochs,
            lr:                   a.lr,
            lstm_size:            a.lstm_size,
            n_layers:             a.n_layers,
            margin:               a.margin,
            encoder:              a.encoder.into(),
            seed:                 a.seed,
        }
    }
}

/// All arguments for the `check` command
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// First question of the pair
    #[arg(long)]
    pub question1: String,

    /// Second question of the pair
    #[arg(long)]
    pub question2: String,

    /// Directory where checkpoints were saved during training
    #[arg(long, default_value = "checkpoints")]
    pub checkpoint_dir: String,
}
