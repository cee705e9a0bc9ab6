// ============================================================
// Layer 4 — Question Pair Loader
// ============================================================
// Loads labelled question pairs from a CSV file using the
// csv crate's serde integration.
//
// Expected columns (by header name, any order, extras ignored):
//   question1    — string
//   question2    — string
//   is_duplicate — 0 or 1
//
// Loading fails fast: an unreadable file, a missing required
// column, or a malformed row all abort the load with a
// descriptive error. There is no partial load — the training
// pipeline either gets the whole file or nothing.
//
// Reference: csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use crate::domain::question_pair::QuestionPair;
use crate::domain::traits::PairSource;

/// Columns the CSV must provide for training to make sense.
const REQUIRED_COLUMNS: [&str; 3] = ["question1", "question2", "is_duplicate"];

/// Loads every labelled pair from one CSV file.
/// Implements the PairSource trait from Layer 3.
pub struct CsvPairLoader {
    /// Path to the CSV file
    path: String,
}

impl CsvPairLoader {
    /// Create a new CsvPairLoader pointed at a file
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl PairSource for CsvPairLoader {
    fn load_all(&self) -> Result<Vec<QuestionPair>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .with_context(|| format!("Cannot open question pair CSV '{}'", self.path))?;

        // Validate the header row up front so a file with the wrong
        // schema fails immediately, not at the first deserialized row.
        let headers = reader
            .headers()
            .with_context(|| format!("Cannot read CSV header from '{}'", self.path))?
            .clone();

        for required in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == required) {
                anyhow::bail!(
                    "CSV '{}' is missing required column '{}' (found: {})",
                    self.path,
                    required,
                    headers.iter().collect::<Vec<_>>().join(", "),
                );
            }
        }

        let mut pairs = Vec::new();

        for (row, record) in reader.deserialize::<QuestionPair>().enumerate() {
            // Row numbers are 1-based and the header occupies row 1.
            let pair = record
                .with_context(|| format!("Malformed row {} in '{}'", row + 2, self.path))?;
            pairs.push(pair);
        }

        tracing::info!("Loaded {} question pairs from '{}'", pairs.len(), self.path);
        Ok(pairs)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}_{}.csv", name, std::process::id()));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_loads_all_rows() {
        let path = write_temp_csv(
            "pairs_ok",
            "id,question1,question2,is_duplicate\n\
             0,How do I learn Rust?,What is the best way to learn Rust?,1\n\
             1,\"What is 2, plus 2?\",Is the moon a planet?,0\n",
        );
        let pairs = CsvPairLoader::new(path.to_str().unwrap()).load_all().unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].is_duplicate, 1);
        // Quoted commas stay inside the field
        assert_eq!(pairs[1].question1, "What is 2, plus 2?");
        assert_eq!(pairs[1].is_duplicate, 0);
    }

    #[test]
    fn test_missing_column_fails_fast() {
        let path = write_temp_csv(
            "pairs_missing_col",
            "question1,question2\nfoo,bar\n",
        );
        let err = CsvPairLoader::new(path.to_str().unwrap())
            .load_all()
            .unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(err.to_string().contains("is_duplicate"));
    }

    #[test]
    fn test_unreadable_file_fails() {
        let loader = CsvPairLoader::new("definitely/not/a/real/path.csv");
        assert!(loader.load_all().is_err());
    }

    #[test]
    fn test_malformed_label_fails() {
        let path = write_temp_csv(
            "pairs_bad_label",
            "question1,question2,is_duplicate\nfoo,bar,maybe\n",
        );
        let result = CsvPairLoader::new(path.to_str().unwrap()).load_all();
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }
}
