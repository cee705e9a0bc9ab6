// ============================================================
// Layer 2 — Check Use Case
// ============================================================
// Loads a trained checkpoint and scores a single question pair:
//   1. Rebuild the encoder from the saved config + latest weights
//   2. Encode both questions, measure the L1 distance
//   3. Call the pair a duplicate if the distance is inside half
//      the training margin — the midpoint between the two
//      training targets (0 for duplicates, margin for the rest)

use anyhow::Result;

use crate::domain::traits::PairScorer;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::inferencer::Inferencer;

/// Outcome of checking one pair.
#[derive(Debug, Clone, Copy)]
pub struct PairVerdict {
    /// L1 distance between the two representations
    pub distance: f32,
    /// True if the distance falls inside the duplicate zone
    pub duplicate: bool,
}

pub struct CheckUseCase {
    inferencer: Inferencer,
    margin:     f32,
}

impl CheckUseCase {
    pub fn new(checkpoint_dir: String) -> Result<Self> {
        let ckpt_manager = CheckpointManager::new(&checkpoint_dir);
        let margin       = ckpt_manager.load_config()?.margin;
        let inferencer   = Inferencer::from_checkpoint(&ckpt_manager)?;
        Ok(Self { inferencer, margin })
    }

    pub fn check(&self, question1: &str, question2: &str) -> Result<PairVerdict> {
        let distance  = self.inferencer.distance(question1, question2)?;
        let duplicate = distance < self.margin * 0.5;

        tracing::info!(
            "distance={:.4} margin={:.1} duplicate={}",
            distance,
            self.margin,
            duplicate,
        );

        Ok(PairVerdict { distance, duplicate })
    }
}
