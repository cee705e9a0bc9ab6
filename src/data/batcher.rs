// ============================================================
// Layer 4 — Pair Batcher
// ============================================================
// Converts one side of a Batch (three aligned slices) into
// GPU-ready tensors.
//
// How batching works here:
//   Input:  N rows of token indices, each of length S
//   Output: PairBatch with two [N, S] Int tensors and one
//           [N] Int label tensor
//
//   We flatten all rows into one long Vec, then reshape:
//   [r1_t1, ..., r1_tS, r2_t1, ..., rN_tS] → [N, S]
//
// Why is this easy here?
//   Because every encoded question already has exactly
//   embedding_dim entries. If they didn't, we'd need dynamic
//   padding here.
//
// The dataset's slice generator replaces Burn's DataLoader in
// this pipeline, so the batcher is a plain method rather than an
// implementation of burn's Batcher trait — the tensor
// construction pattern is the same.
//
// Reference: Rust Book §8 (Vectors)

use burn::prelude::*;

use crate::data::dataset::EncodedQuestion;

// ─── PairBatch ────────────────────────────────────────────────────────────────
/// A batch of question pairs ready for the two encoder passes.
/// All tensors have batch_size as their first dimension.
///
/// B is the Burn Backend (e.g. Wgpu, NdArray) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct PairBatch<B: Backend> {
    /// First-question index rows — shape: [batch_size, embedding_dim]
    pub x1: Tensor<B, 2, Int>,

    /// Second-question index rows — shape: [batch_size, embedding_dim]
    pub x2: Tensor<B, 2, Int>,

    /// Duplicate labels (0 or 1) — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── PairBatcher ──────────────────────────────────────────────────────────────
/// The batcher struct — holds the target device so tensors
/// are created on the correct GPU/CPU.
#[derive(Clone, Debug)]
pub struct PairBatcher<B: Backend> {
    /// The device to create tensors on (e.g. GPU index 0)
    pub device: B::Device,
}

impl<B: Backend> PairBatcher<B> {
    /// Create a new batcher for the given device
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Convert three aligned slices into one PairBatch.
    /// Callers must not pass empty slices — the training loop
    /// skips batches whose slice side is empty.
    pub fn batch(
        &self,
        x1:     &[EncodedQuestion],
        x2:     &[EncodedQuestion],
        labels: &[u8],
    ) -> PairBatch<B> {
        let batch_size = x1.len();
        // Every row is pre-padded to the same length
        let seq_len = x1[0].len();

        // Burn uses i32 for Int tensor construction
        let x1_flat: Vec<i32> = x1
            .iter()
            .flat_map(|row| row.iter().map(|&t| t as i32))
            .collect();

        let x2_flat: Vec<i32> = x2
            .iter()
            .flat_map(|row| row.iter().map(|&t| t as i32))
            .collect();

        let labels_flat: Vec<i32> = labels.iter().map(|&l| l as i32).collect();

        let x1 = Tensor::<B, 1, Int>::from_ints(x1_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let x2 = Tensor::<B, 1, Int>::from_ints(x2_flat.as_slice(), &self.device)
            .reshape([batch_size, seq_len]);

        let labels = Tensor::<B, 1, Int>::from_ints(labels_flat.as_slice(), &self.device);

        PairBatch { x1, x2, labels }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    #[test]
    fn test_batch_shapes() {
        let device = Default::default();
        let batcher = PairBatcher::<TestBackend>::new(device);

        let x1 = vec![vec![1, 2, 0, 0], vec![3, 4, 5, 0], vec![6, 0, 0, 0]];
        let x2 = vec![vec![1, 2, 0, 0], vec![9, 9, 9, 9], vec![7, 8, 0, 0]];
        let labels = vec![1u8, 0, 0];

        let batch = batcher.batch(&x1, &x2, &labels);

        assert_eq!(batch.x1.dims(), [3, 4]);
        assert_eq!(batch.x2.dims(), [3, 4]);
        assert_eq!(batch.labels.dims(), [3]);
    }

    #[test]
    fn test_rows_survive_the_round_trip() {
        let device = Default::default();
        let batcher = PairBatcher::<TestBackend>::new(device);

        let x1 = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let x2 = vec![vec![0, 0, 0], vec![37, 36, 35]];
        let labels = vec![0u8, 1];

        let batch = batcher.batch(&x1, &x2, &labels);

        // NdArray stores Int tensors as i64
        let x2_data: Vec<i64> = batch.x2.into_data().to_vec().unwrap();
        assert_eq!(x2_data, vec![0, 0, 0, 37, 36, 35]);

        let label_data: Vec<i64> = batch.labels.into_data().to_vec().unwrap();
        assert_eq!(label_data, vec![0, 1]);
    }
}
