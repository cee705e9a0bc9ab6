// ============================================================
// Layer 3 — QuestionPair Domain Type
// ============================================================
// Represents one labelled example from the training CSV:
// two question strings and a binary duplicate label.
//
// This is the unit of supervision for the siamese network.
// The model never sees the pair jointly — each question goes
// through the encoder on its own, and only the distance between
// the two resulting vectors meets the label.
//
// Example:
//   question1:    "How do I learn Rust?"
//   question2:    "What is the best way to learn Rust?"
//   is_duplicate: 1
//
// Reference: Rust Book §5 (Structs)
//            Mueller & Thyagarajan (2016) Siamese LSTM paper

use serde::{Deserialize, Serialize};

/// One row of the question pair CSV.
///
/// The field names match the required CSV column headers exactly,
/// so serde can deserialize records by header name. Extra columns
/// in the file (row ids etc.) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPair {
    /// First question, raw text as it appears in the CSV
    pub question1: String,

    /// Second question, raw text as it appears in the CSV
    pub question2: String,

    /// 1 if the two questions ask the same thing, 0 otherwise
    pub is_duplicate: u8,
}

impl QuestionPair {
    /// Create a new QuestionPair.
    /// Uses impl Into<String> so callers can pass &str or String.
    pub fn new(
        question1:    impl Into<String>,
        question2:    impl Into<String>,
        is_duplicate: u8,
    ) -> Self {
        Self {
            question1:    question1.into(),
            question2:    question2.into(),
            is_duplicate,
        }
    }
}
