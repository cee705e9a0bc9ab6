// ============================================================
// Layer 4 — Train/Validation Index Sampler
// ============================================================
// Draws the row indices that become the training and validation
// partitions.
//
// Why sample without replacement?
//   The full Quora-style pair file has far more rows than a
//   single run needs. We draw n_train + n_validation DISTINCT
//   rows so no example appears twice, shuffle them, and split:
//   the first n_train indices form the training partition, the
//   rest form the validation partition. The two partitions are
//   therefore disjoint by construction.
//
// Why take the RNG as a parameter?
//   Subsampling is the only randomized step in the pipeline.
//   Passing the generator in (instead of reaching for a
//   process-global source) lets callers seed it, which makes a
//   training run's partitioning reproducible and lets the tests
//   assert exact behaviour.
//
// rand::seq::index::sample is Floyd's algorithm — the standard
// unbiased without-replacement draw.
//
// Reference: rand crate documentation
//            Rust Book §8 (Vectors)

use rand::{seq::SliceRandom, Rng};

/// Draw disjoint train/validation index sets from `0..total`.
///
/// # Arguments
/// * `rng`          - Seedable random source (e.g. StdRng::seed_from_u64)
/// * `total`        - Number of rows available
/// * `n_train`      - Training partition size
/// * `n_validation` - Validation partition size
///
/// # Returns
/// A tuple (train_indices, validation_indices)
///
/// Callers must check `n_train + n_validation <= total` first;
/// the dataset layer reports that as a precondition error.
pub fn sample_partitions<R: Rng>(
    rng:          &mut R,
    total:        usize,
    n_train:      usize,
    n_validation: usize,
) -> (Vec<usize>, Vec<usize>) {
    let mut global_idx =
        rand::seq::index::sample(rng, total, n_train + n_validation).into_vec();

    // Fisher-Yates shuffle so the train/validation boundary does not
    // depend on the order the sampler emitted the indices in.
    global_idx.shuffle(rng);

    // split_off(n) removes elements [n..] and returns them
    let validation_idx = global_idx.split_off(n_train);

    tracing::debug!(
        "Sampled partitions: {} train, {} validation from {} rows",
        global_idx.len(),
        validation_idx.len(),
        total,
    );

    (global_idx, validation_idx)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn test_partition_sizes() {
        let mut rng = StdRng::seed_from_u64(7);
        let (train, valid) = sample_partitions(&mut rng, 100, 70, 20);
        assert_eq!(train.len(), 70);
        assert_eq!(valid.len(), 20);
    }

    #[test]
    fn test_partitions_are_disjoint_subsets() {
        let mut rng = StdRng::seed_from_u64(7);
        let (train, valid) = sample_partitions(&mut rng, 50, 30, 10);

        let train_set: HashSet<usize> = train.iter().copied().collect();
        let valid_set: HashSet<usize> = valid.iter().copied().collect();

        // No duplicates inside either partition
        assert_eq!(train_set.len(), 30);
        assert_eq!(valid_set.len(), 10);
        // Disjoint across partitions
        assert!(train_set.is_disjoint(&valid_set));
        // Every index comes from the original row range
        assert!(train_set.iter().chain(valid_set.iter()).all(|&i| i < 50));
    }

    #[test]
    fn test_same_seed_same_partitions() {
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        assert_eq!(
            sample_partitions(&mut rng_a, 200, 150, 40),
            sample_partitions(&mut rng_b, 200, 150, 40),
        );
    }

    #[test]
    fn test_exact_fit_uses_every_row() {
        let mut rng = StdRng::seed_from_u64(1);
        let (train, valid) = sample_partitions(&mut rng, 10, 7, 3);
        let all: HashSet<usize> = train.iter().chain(valid.iter()).copied().collect();
        assert_eq!(all, (0..10).collect::<HashSet<usize>>());
    }
}
