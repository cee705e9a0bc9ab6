// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load the pair CSV          (Layer 4 - data)
//   Step 2: Encode both columns        (Layer 4 - data)
//   Step 3: Subsample train/validation (Layer 4 - data)
//   Step 4: Save config + metrics home (Layer 6 - infra)
//   Step 5: Run training loop          (Layer 5 - ml)
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::data::{dataset::PairDataset, loader::CsvPairLoader, vocab};
use crate::domain::traits::PairSource;
use crate::infra::{checkpoint::CheckpointManager, metrics::MetricsLogger};
use crate::ml::encoder::EncoderKind;
use crate::ml::trainer::run_training;

// ─── Training Configuration ──────────────────────────────────────────────────
// All hyperparameters for a training run.
// Serialisable so it can be saved to disk and reloaded for the
// `check` command, which must rebuild the exact encoder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub train_csv:            String,
    pub checkpoint_dir:       String,
    pub embedding_dim:        usize,
    pub n_train_samples:      usize,
    pub n_validation_samples: usize,
    pub batch_size:           usize,
    pub epochs:               usize,
    pub lr:                   f64,
    pub lstm_size:            usize,
    pub n_layers:             usize,
    pub margin:               f32,
    pub encoder:              EncoderKind,
    pub seed:                 u64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            train_csv:            "data/train.csv".to_string(),
            checkpoint_dir:       "checkpoints".to_string(),
            embedding_dim:        80,
            n_train_samples:      400_000,
            n_validation_samples: 10_000,
            batch_size:           128,
            epochs:               5,
            lr:                   1e-3,
            lstm_size:            128,
            n_layers:             2,
            margin:               10.0,
            encoder:              EncoderKind::BiRnn,
            seed:                 42,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
// Owns the config and runs the full training pipeline.
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    /// Create a new TrainUseCase with the given configuration
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Execute the full training pipeline end to end
    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // The one-hot width equals embedding_dim, so every
        // vocabulary index (up to 37) must fit below it.
        anyhow::ensure!(
            cfg.embedding_dim >= vocab::VOCAB_SIZE,
            "embedding_dim must be at least {} so every character \
             index fits the one-hot width (got {})",
            vocab::VOCAB_SIZE,
            cfg.embedding_dim,
        );

        // ── Step 1: Load the labelled pairs ──────────────────────────────────
        tracing::info!("Loading question pairs from '{}'", cfg.train_csv);
        let loader = CsvPairLoader::new(&cfg.train_csv);
        let pairs  = loader.load_all()?;

        // ── Step 2: Encode both question columns ──────────────────────────────
        let mut dataset = PairDataset::preprocess(&pairs, cfg.embedding_dim);

        // ── Step 3: Subsample train/validation partitions ─────────────────────
        // Seeded RNG so a run's partitioning is reproducible
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        dataset.subsample(cfg.n_train_samples, cfg.n_validation_samples, &mut rng)?;

        // ── Step 4: Persist the config, open the metrics log ──────────────────
        let ckpt_manager = CheckpointManager::new(&cfg.checkpoint_dir);
        ckpt_manager.save_config(cfg)?;
        let metrics = MetricsLogger::new(&cfg.checkpoint_dir)?;

        // ── Step 5: Run training loop (Layer 5) ───────────────────────────────
        run_training(cfg, dataset, ckpt_manager, metrics)?;

        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_undersized_embedding_dim() {
        let cfg = TrainConfig {
            embedding_dim: 20,
            ..TrainConfig::default()
        };
        let err = TrainUseCase::new(cfg).execute().unwrap_err();
        assert!(err.to_string().contains("embedding_dim"));
    }
}
