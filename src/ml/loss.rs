// ============================================================
// Layer 5 — Contrastive L1 Loss
// ============================================================
// Scores a batch of representation pairs against their labels.
//
// Per example, with d = L1 distance between the two vectors:
//   duplicate     (y=1): contribution = d
//   non-duplicate (y=0): contribution = max(0, margin - d)
// Batch loss = 0.5 * mean(contributions)
//
// A duplicate pair is pulled toward distance 0; a non-duplicate
// pair is pushed until it clears the margin, after which it
// contributes nothing. L1 rather than L2: the per-dimension
// absolute differences of character-sequence representations
// stay interpretable and the gradient does not vanish near 0.
//
// Everything is expressed in burn tensor ops so the loss is
// differentiable on the autodiff backend.
//
// Reference: Hadsell et al. (2006) contrastive loss
//            Burn Book §3 (Building Blocks)

use burn::prelude::*;

/// Per-example L1 (Manhattan) distance between two
/// [batch, repr_size] representation batches → [batch].
pub fn manhattan_distance<B: Backend>(
    q1_repr: Tensor<B, 2>,
    q2_repr: Tensor<B, 2>,
) -> Tensor<B, 1> {
    (q1_repr - q2_repr).abs().sum_dim(1).squeeze::<1>(1)
}

/// Contrastive loss with a fixed margin.
#[derive(Debug, Clone)]
pub struct ContrastiveLoss {
    /// Distance beyond which a non-duplicate pair stops being penalised
    pub margin: f32,
}

impl ContrastiveLoss {
    pub fn new(margin: f32) -> Self {
        Self { margin }
    }

    /// q1_repr, q2_repr: [batch, repr_size]; labels: [batch] of 0/1
    /// → scalar loss tensor of shape [1]
    pub fn forward<B: Backend>(
        &self,
        q1_repr: Tensor<B, 2>,
        q2_repr: Tensor<B, 2>,
        labels:  Tensor<B, 1, Int>,
    ) -> Tensor<B, 1> {
        let distance = manhattan_distance(q1_repr, q2_repr);

        let labels_t = labels.float();
        // labels_f = 1 - y, selects the non-duplicate rows
        let labels_f = labels_t.ones_like() - labels_t.clone();

        let pos = labels_t * distance.clone();
        let neg = labels_f * (distance.neg() + self.margin).clamp_min(0.0);

        (pos + neg).mean() * 0.5
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    type TestBackend = burn::backend::NdArray;

    fn repr(rows: &[f32], width: usize) -> Tensor<TestBackend, 2> {
        let device = Default::default();
        Tensor::<TestBackend, 1>::from_floats(rows, &device)
            .reshape([rows.len() / width, width])
    }

    fn labels(values: &[i32]) -> Tensor<TestBackend, 1, Int> {
        let device = Default::default();
        Tensor::<TestBackend, 1, Int>::from_ints(values, &device)
    }

    fn scalar(t: Tensor<TestBackend, 1>) -> f32 {
        t.into_scalar()
    }

    #[test]
    fn test_manhattan_distance_values() {
        let d = manhattan_distance(repr(&[1.0, 2.0, 0.0, 0.0], 2), repr(&[0.0, 0.0, 1.0, 1.0], 2));
        let d: Vec<f32> = d.into_data().to_vec().unwrap();
        assert_eq!(d, vec![3.0, 2.0]);
    }

    #[test]
    fn test_identical_duplicate_pair_costs_nothing() {
        let loss = ContrastiveLoss::new(5.0);
        let q = repr(&[0.5, -1.5, 2.0], 3);
        let value = scalar(loss.forward(q.clone(), q, labels(&[1])));
        assert!(value.abs() < 1e-6);
    }

    #[test]
    fn test_separated_non_duplicate_pair_costs_nothing() {
        // d = 6 >= margin 5 → max(0, 5 - 6) = 0
        let loss = ContrastiveLoss::new(5.0);
        let value = scalar(loss.forward(
            repr(&[6.0, 0.0], 2),
            repr(&[0.0, 0.0], 2),
            labels(&[0]),
        ));
        assert!(value.abs() < 1e-6);
    }

    #[test]
    fn test_duplicate_pair_pays_its_distance() {
        // d = 4, y = 1 → loss = 0.5 * 4 = 2
        let loss = ContrastiveLoss::new(5.0);
        let value = scalar(loss.forward(
            repr(&[1.0, 3.0], 2),
            repr(&[0.0, 0.0], 2),
            labels(&[1]),
        ));
        assert!((value - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_close_non_duplicate_pair_pays_the_shortfall() {
        // d = 3, margin = 5 → contribution 2, loss = 0.5 * 2 = 1
        let loss = ContrastiveLoss::new(5.0);
        let value = scalar(loss.forward(
            repr(&[1.0, 2.0], 2),
            repr(&[0.0, 0.0], 2),
            labels(&[0]),
        ));
        assert!((value - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mixed_batch_is_the_mean_of_contributions() {
        // Row 0: y=1, d=4 → 4
        // Row 1: y=0, d=1 → margin 5 - 1 = 4
        // loss = 0.5 * mean(4, 4) = 2
        let loss = ContrastiveLoss::new(5.0);
        let value = scalar(loss.forward(
            repr(&[4.0, 0.0, 1.0, 0.0], 2),
            repr(&[0.0, 0.0, 0.0, 0.0], 2),
            labels(&[1, 0]),
        ));
        assert!((value - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_loss_is_never_negative() {
        let loss = ContrastiveLoss::new(3.0);
        for (q1, q2, y) in [
            (vec![10.0, -10.0], vec![-10.0, 10.0], 1),
            (vec![10.0, -10.0], vec![-10.0, 10.0], 0),
            (vec![0.1, 0.0], vec![0.0, 0.1], 0),
        ] {
            let value = scalar(loss.forward(repr(&q1, 2), repr(&q2, 2), labels(&[y])));
            assert!(value >= 0.0);
        }
    }
}
