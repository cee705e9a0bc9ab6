// ============================================================
// Layer 4 — Pair Dataset
// ============================================================
// Owns the six aligned containers the whole pipeline revolves
// around:
//
//   train_x1, train_x2, train_labels
//   valid_x1, valid_x2, valid_labels
//
// Row i of x1, x2 and labels always describes the same example —
// that alignment is the one invariant every operation here must
// preserve.
//
// Lifecycle:
//   preprocess  → encode every CSV row, everything starts in the
//                 train containers, validation is empty
//   subsample   → draw disjoint train/validation partitions from
//                 the full set (seedable, without replacement)
//   batch_generator → lazy contiguous slices for the training loop
//
// The generator yields borrowed views, so a Batch costs nothing
// to construct and lives only for the one step that consumes it.
//
// Reference: Rust Book §8 (Vectors), §13 (Iterators)

use anyhow::Result;
use rand::Rng;

use crate::data::splitter::sample_partitions;
use crate::data::vocab;
use crate::domain::question_pair::QuestionPair;

/// One fixed-length row of character indices.
pub type EncodedQuestion = Vec<u32>;

// ─── Batch ────────────────────────────────────────────────────────────────────
/// A borrowed view over one contiguous index range of all six
/// containers. The train side always spans `batch_size` rows
/// (except for the final, possibly shorter batch); the validation
/// side is the same index range clamped to the validation row
/// count, so once the smaller validation partition is exhausted
/// the remaining batches carry empty validation slices.
///
/// The two sides are coupled purely by position — a validation
/// row that happens to share an offset with a train row is NOT a
/// matched example.
#[derive(Debug)]
pub struct Batch<'a> {
    pub train_x1:     &'a [EncodedQuestion],
    pub train_x2:     &'a [EncodedQuestion],
    pub train_labels: &'a [u8],
    pub valid_x1:     &'a [EncodedQuestion],
    pub valid_x2:     &'a [EncodedQuestion],
    pub valid_labels: &'a [u8],
}

impl<'a> Batch<'a> {
    /// Number of training rows in this batch
    pub fn train_size(&self) -> usize {
        self.train_x1.len()
    }

    /// True if this batch still carries validation rows
    pub fn has_validation_rows(&self) -> bool {
        !self.valid_x1.is_empty()
    }
}

// ─── PairDataset ──────────────────────────────────────────────────────────────
pub struct PairDataset {
    pub train_x1:     Vec<EncodedQuestion>,
    pub train_x2:     Vec<EncodedQuestion>,
    pub train_labels: Vec<u8>,
    pub valid_x1:     Vec<EncodedQuestion>,
    pub valid_x2:     Vec<EncodedQuestion>,
    pub valid_labels: Vec<u8>,
    embedding_dim:    usize,
}

impl PairDataset {
    /// Encode every raw pair into the six containers.
    ///
    /// Both question columns are lowercased and encoded completely
    /// independently — the only thing they share is the static
    /// vocabulary table. All rows land in the train containers;
    /// subsample() carves the validation partition out later.
    pub fn preprocess(pairs: &[QuestionPair], embedding_dim: usize) -> Self {
        let train_x1 = pairs
            .iter()
            .map(|p| vocab::encode(&p.question1.to_lowercase(), embedding_dim))
            .collect();
        let train_x2 = pairs
            .iter()
            .map(|p| vocab::encode(&p.question2.to_lowercase(), embedding_dim))
            .collect();
        let train_labels = pairs.iter().map(|p| p.is_duplicate).collect();

        tracing::info!(
            "Preprocessed {} pairs at embedding_dim={}",
            pairs.len(),
            embedding_dim,
        );

        Self {
            train_x1,
            train_x2,
            train_labels,
            valid_x1:     Vec::new(),
            valid_x2:     Vec::new(),
            valid_labels: Vec::new(),
            embedding_dim,
        }
    }

    /// Fixed row length every encoded question in this dataset has
    pub fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    /// Rows currently in the training partition
    pub fn train_len(&self) -> usize {
        self.train_x1.len()
    }

    /// Rows currently in the validation partition
    pub fn validation_len(&self) -> usize {
        self.valid_x1.len()
    }

    /// Draw disjoint train/validation partitions from the full
    /// preprocessed set, without replacement.
    ///
    /// Asking for more rows than exist is a precondition violation
    /// and reported as an error — never silently clamped.
    ///
    /// Both partitions are gathered from the ORIGINAL containers
    /// before the train containers are replaced. The order matters:
    /// replacing train first and then slicing validation out of the
    /// already-shrunk containers would alias the two partitions.
    pub fn subsample<R: Rng>(
        &mut self,
        n_train:      usize,
        n_validation: usize,
        rng:          &mut R,
    ) -> Result<()> {
        let total = self.train_x1.len();
        anyhow::ensure!(
            n_train + n_validation <= total,
            "subsample requested {} rows ({} train + {} validation) \
             but only {} are available",
            n_train + n_validation,
            n_train,
            n_validation,
            total,
        );

        let (train_idx, valid_idx) = sample_partitions(rng, total, n_train, n_validation);

        self.valid_x1     = gather(&self.train_x1, &valid_idx);
        self.valid_x2     = gather(&self.train_x2, &valid_idx);
        self.valid_labels = gather(&self.train_labels, &valid_idx);

        self.train_x1     = gather(&self.train_x1, &train_idx);
        self.train_x2     = gather(&self.train_x2, &train_idx);
        self.train_labels = gather(&self.train_labels, &train_idx);

        tracing::info!(
            "Subsampled: {} train rows, {} validation rows",
            self.train_len(),
            self.validation_len(),
        );
        Ok(())
    }

    /// Lazy sequence of contiguous batches over the training
    /// partition, each zipped with the positionally corresponding
    /// validation slice.
    ///
    /// Yields exactly ceil(train_len / batch_size) batches; an
    /// empty partition yields an empty sequence. The iterator
    /// carries no shared cursor — restarting an epoch means
    /// calling batch_generator() again.
    pub fn batch_generator(&self, batch_size: usize) -> impl Iterator<Item = Batch<'_>> {
        assert!(batch_size > 0, "batch_size must be positive");

        let train_len = self.train_x1.len();
        let valid_len = self.valid_x1.len();

        (0..train_len).step_by(batch_size).map(move |start| {
            let end    = (start + batch_size).min(train_len);
            let vstart = start.min(valid_len);
            let vend   = end.min(valid_len);

            Batch {
                train_x1:     &self.train_x1[start..end],
                train_x2:     &self.train_x2[start..end],
                train_labels: &self.train_labels[start..end],
                valid_x1:     &self.valid_x1[vstart..vend],
                valid_x2:     &self.valid_x2[vstart..vend],
                valid_labels: &self.valid_labels[vstart..vend],
            }
        })
    }
}

/// Copy the rows at `indices` out of `src`, in index order.
fn gather<T: Clone>(src: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| src[i].clone()).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    /// Pairs whose encoded rows are pairwise distinct, so row
    /// identity can stand in for index identity in the split tests.
    fn unique_pairs(n: usize) -> Vec<QuestionPair> {
        (0..n)
            .map(|i| {
                QuestionPair::new(
                    format!("first question {i}"),
                    format!("second question {i}"),
                    (i % 2) as u8,
                )
            })
            .collect()
    }

    #[test]
    fn test_preprocess_aligns_and_lowercases() {
        let pairs = vec![QuestionPair::new("ABC", "abc", 1)];
        let ds = PairDataset::preprocess(&pairs, 5);

        assert_eq!(ds.train_len(), 1);
        assert_eq!(ds.validation_len(), 0);
        // "ABC" is lowercased before encoding, so both columns match
        assert_eq!(ds.train_x1[0], vec![1, 2, 3, 0, 0]);
        assert_eq!(ds.train_x1[0], ds.train_x2[0]);
        assert_eq!(ds.train_labels[0], 1);
    }

    #[test]
    fn test_subsample_sizes_and_disjointness() {
        let mut ds = PairDataset::preprocess(&unique_pairs(40), 30);
        let original: HashSet<EncodedQuestion> = ds.train_x1.iter().cloned().collect();

        let mut rng = StdRng::seed_from_u64(3);
        ds.subsample(25, 10, &mut rng).unwrap();

        assert_eq!(ds.train_len(), 25);
        assert_eq!(ds.validation_len(), 10);
        assert_eq!(ds.train_labels.len(), 25);
        assert_eq!(ds.valid_labels.len(), 10);

        let train_rows: HashSet<EncodedQuestion> = ds.train_x1.iter().cloned().collect();
        let valid_rows: HashSet<EncodedQuestion> = ds.valid_x1.iter().cloned().collect();

        // Disjoint partitions, both drawn from the original rows
        assert!(train_rows.is_disjoint(&valid_rows));
        assert!(train_rows.is_subset(&original));
        assert!(valid_rows.is_subset(&original));
    }

    #[test]
    fn test_subsample_rejects_oversized_request() {
        let mut ds = PairDataset::preprocess(&unique_pairs(10), 20);
        let mut rng = StdRng::seed_from_u64(0);

        let err = ds.subsample(8, 5, &mut rng).unwrap_err();
        assert!(err.to_string().contains("only 10 are available"));
        // Failed subsample leaves the containers untouched
        assert_eq!(ds.train_len(), 10);
        assert_eq!(ds.validation_len(), 0);
    }

    #[test]
    fn test_batch_count_and_reconstruction() {
        let mut ds = PairDataset::preprocess(&unique_pairs(23), 20);
        let mut rng = StdRng::seed_from_u64(9);
        ds.subsample(17, 5, &mut rng).unwrap();

        let batches: Vec<_> = ds.batch_generator(5).collect();

        // ceil(17 / 5) = 4 batches, last one short
        assert_eq!(batches.len(), 4);
        assert_eq!(batches[0].train_size(), 5);
        assert_eq!(batches[3].train_size(), 2);

        // Concatenating the yielded slices in order reconstructs
        // the training partition exactly
        let rebuilt: Vec<EncodedQuestion> = batches
            .iter()
            .flat_map(|b| b.train_x1.iter().cloned())
            .collect();
        assert_eq!(rebuilt, ds.train_x1);

        let rebuilt_labels: Vec<u8> = batches
            .iter()
            .flat_map(|b| b.train_labels.iter().copied())
            .collect();
        assert_eq!(rebuilt_labels, ds.train_labels);
    }

    #[test]
    fn test_exact_multiple_has_no_short_batch() {
        let mut ds = PairDataset::preprocess(&unique_pairs(20), 20);
        let mut rng = StdRng::seed_from_u64(9);
        ds.subsample(16, 4, &mut rng).unwrap();

        let sizes: Vec<usize> = ds.batch_generator(4).map(|b| b.train_size()).collect();
        assert_eq!(sizes, vec![4, 4, 4, 4]);
    }

    #[test]
    fn test_validation_slices_clamp_to_partition() {
        let mut ds = PairDataset::preprocess(&unique_pairs(20), 20);
        let mut rng = StdRng::seed_from_u64(5);
        ds.subsample(15, 3, &mut rng).unwrap();

        let batches: Vec<_> = ds.batch_generator(5).collect();
        assert_eq!(batches.len(), 3);

        // First batch spans [0..5) on the train side but the
        // validation partition only has 3 rows
        assert_eq!(batches[0].valid_x1.len(), 3);
        assert!(batches[0].has_validation_rows());
        // Later index ranges fall entirely past the validation rows
        assert_eq!(batches[1].valid_x1.len(), 0);
        assert!(!batches[2].has_validation_rows());
    }

    #[test]
    fn test_empty_partition_yields_no_batches() {
        let ds = PairDataset::preprocess(&[], 10);
        assert_eq!(ds.batch_generator(4).count(), 0);
    }

    #[test]
    fn test_generator_is_restartable() {
        let ds = PairDataset::preprocess(&unique_pairs(7), 10);

        let first:  Vec<usize> = ds.batch_generator(3).map(|b| b.train_size()).collect();
        let second: Vec<usize> = ds.batch_generator(3).map(|b| b.train_size()).collect();

        assert_eq!(first, vec![3, 3, 1]);
        assert_eq!(first, second);
    }
}
