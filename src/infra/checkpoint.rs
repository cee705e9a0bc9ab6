// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores encoder weights using Burn's CompactRecorder.
//
// What gets saved per checkpoint:
//   1. Encoder weights (.mpk.gz file) — all learned parameters
//   2. latest_epoch.json              — which epoch was last saved
//   3. train_config.json              — architecture + hyperparameters
//
// The config travels separately because loading weights requires
// rebuilding the exact encoder (kind, lstm_size, n_layers,
// embedding_dim) first; without it the record cannot be applied.
//
// File naming convention:
//   checkpoints/
//     model_epoch_1.mpk.gz   ← weights after epoch 1
//     model_epoch_2.mpk.gz   ← weights after epoch 2
//     ...
//     latest_epoch.json      ← number of the latest epoch
//     train_config.json      ← training hyperparameters
//
// Reference: Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
    tensor::backend::AutodiffBackend,
};
use serde_json;

use crate::application::train_use_case::TrainConfig;
use crate::ml::encoder::QuestionEncoder;

/// Manages saving and loading of model checkpoints.
/// All files are stored in the configured directory.
pub struct CheckpointManager {
    /// Path to the directory where checkpoints are stored
    dir: PathBuf,
}

impl CheckpointManager {
    /// Create a new CheckpointManager.
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<String>) -> Self {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir).ok();
        Self { dir }
    }

    /// Save encoder weights for a given epoch and update the
    /// latest-epoch pointer the inferencer reads.
    pub fn save_model<B: AutodiffBackend>(
        &self,
        model: &QuestionEncoder<B>,
        epoch: usize,
    ) -> Result<()> {
        // Recorder adds the .mpk.gz extension itself
        let path = self.dir.join(format!("model_epoch_{epoch}"));

        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| {
                format!("Failed to save checkpoint to '{}'", path.display())
            })?;

        let latest_path = self.dir.join("latest_epoch.json");
        fs::write(&latest_path, serde_json::to_string(&epoch)?)
            .with_context(|| "Failed to write latest_epoch.json")?;

        tracing::debug!("Saved checkpoint: epoch {}", epoch);
        Ok(())
    }

    /// Load encoder weights from the latest saved checkpoint.
    ///
    /// The model parameter must have the architecture the
    /// checkpoint was trained with or loading will fail.
    pub fn load_model<B: Backend>(
        &self,
        model:  QuestionEncoder<B>,
        device: &B::Device,
    ) -> Result<QuestionEncoder<B>> {
        let epoch = self.latest_epoch()?;
        let path  = self.dir.join(format!("model_epoch_{epoch}"));

        tracing::info!("Loading checkpoint from epoch {}", epoch);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!("Cannot load checkpoint '{}'. Have you trained the model first?",
                    path.display())
            })?;

        Ok(model.load_record(record))
    }

    /// Save the training configuration to JSON.
    /// Must be called before training starts so `check` can
    /// reconstruct the exact encoder.
    pub fn save_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.dir.join("train_config.json");
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| {
                format!("Cannot write config to '{}'", path.display())
            })?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    /// Load the training configuration from JSON.
    pub fn load_config(&self) -> Result<TrainConfig> {
        let path = self.dir.join("train_config.json");

        let json = fs::read_to_string(&path)
            .with_context(|| {
                format!(
                    "Cannot read config from '{}'. \
                     Make sure you have run 'train' before 'check'.",
                    path.display()
                )
            })?;

        Ok(serde_json::from_str(&json)?)
    }

    /// Read latest_epoch.json and return the epoch number.
    /// Returns an error if training hasn't been run yet.
    fn latest_epoch(&self) -> Result<usize> {
        let path = self.dir.join("latest_epoch.json");

        let s = fs::read_to_string(&path)
            .with_context(|| {
                "Cannot find 'latest_epoch.json'. \
                 Have you run 'train' first?"
            })?;

        Ok(serde_json::from_str::<usize>(&s)?)
    }
}
