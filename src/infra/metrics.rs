// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch.
//
// Metrics recorded per epoch:
//   - epoch:        the epoch number (1, 2, 3, ...)
//   - train_loss:   average contrastive loss on the training set
//   - val_loss:     average contrastive loss on the validation set
//   - dup_dist:     mean validation L1 distance of duplicate pairs
//   - non_dup_dist: mean validation L1 distance of non-duplicate pairs
//
// Output file: checkpoints/metrics.csv
//
// How to read the metrics:
//   - Losses should decrease each epoch
//   - dup_dist should shrink toward 0
//   - non_dup_dist should grow toward (and past) the margin
//   - The gap between the two distance columns IS the learned
//     separation; if it stops widening the run has converged
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::Result;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};
use serde::{Deserialize, Serialize};

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Average contrastive loss over all training batches
    pub train_loss: f64,

    /// Average contrastive loss on the validation set
    /// Should track train_loss — divergence indicates overfitting
    pub val_loss: f64,

    /// Mean validation L1 distance of pairs labelled duplicate
    pub dup_dist: f64,

    /// Mean validation L1 distance of pairs labelled non-duplicate
    pub non_dup_dist: f64,
}

impl EpochMetrics {
    /// Create a new EpochMetrics record
    pub fn new(
        epoch:        usize,
        train_loss:   f64,
        val_loss:     f64,
        dup_dist:     f64,
        non_dup_dist: f64,
    ) -> Self {
        Self { epoch, train_loss, val_loss, dup_dist, non_dup_dist }
    }

    /// Returns true if this epoch improved over the previous best val_loss
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss < best_val_loss
    }

    /// Separation the encoder has learned so far on validation data
    pub fn class_separation(&self) -> f64 {
        self.non_dup_dist - self.dup_dist
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<String>) -> Result<Self> {
        let dir = PathBuf::from(dir.into());
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");

        // Write the header only if the file is new, so repeated runs
        // append instead of clobbering earlier epochs
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,val_loss,dup_dist,non_dup_dist")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6},{:.6}",
            m.epoch,
            m.train_loss,
            m.val_loss,
            m.dup_dist,
            m.non_dup_dist,
        )?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}, val_loss={:.4}",
            m.epoch,
            m.train_loss,
            m.val_loss,
        );

        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
