// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// By programming against traits instead of concrete types,
// we can swap implementations without changing the code
// that uses them. For example:
//   - CsvPairLoader implements PairSource
//   - A future ParquetLoader could also implement PairSource
//   - The application layer only sees PairSource
//     and works with both without any changes
//
// This is the Dependency Inversion Principle from SOLID,
// applied using Rust's trait system.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use crate::domain::question_pair::QuestionPair;

// ─── PairSource ───────────────────────────────────────────────────────────────
/// Any component that can load labelled question pairs.
///
/// Implementations:
///   - CsvPairLoader → loads from a CSV file with
///     question1 / question2 / is_duplicate columns
pub trait PairSource {
    /// Load every labelled pair from this source.
    /// Fails fast: a malformed source yields an error, never a partial load.
    fn load_all(&self) -> Result<Vec<QuestionPair>>;
}

// ─── PairScorer ───────────────────────────────────────────────────────────────
/// Any component that can measure how far apart two questions are
/// in representation space.
///
/// Implementations:
///   - Inferencer → runs both questions through the trained encoder
pub trait PairScorer {
    /// L1 distance between the two questions' representations.
    /// Smaller means more alike; 0 means identical representations.
    fn distance(&self, question1: &str, question2: &str) -> Result<f32>;
}
