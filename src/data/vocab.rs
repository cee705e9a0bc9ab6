// ============================================================
// Layer 4 — Character Vocabulary
// ============================================================
// Maps a lowercase question string to a fixed-length sequence
// of character indices.
//
// The vocabulary is a closed set of 37 symbols:
//   'a'..'z' → 1..26
//   '0'..'9' → 27..36
//   ' '      → 37
// Index 0 is reserved for padding.
//
// Characters outside the set ('?', '!', accented letters, and
// uppercase letters that were not lowercased upstream) are
// dropped entirely — they do not leave a 0 placeholder in the
// middle of the sequence. The encoded row is then truncated or
// right-padded with 0 to exactly `embedding_dim` entries.
//
// Clamp semantics, not validation: empty and overlong input are
// both fine, and encoding never fails.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

/// Number of distinct indices an encoded row can contain:
/// 37 vocabulary characters plus the padding index 0.
pub const VOCAB_SIZE: usize = 38;

/// 1-based index of a character in the vocabulary,
/// or None if the character is not part of it.
pub fn char_index(c: char) -> Option<u32> {
    match c {
        'a'..='z' => Some(c as u32 - 'a' as u32 + 1),
        '0'..='9' => Some(c as u32 - '0' as u32 + 27),
        ' '       => Some(37),
        _         => None,
    }
}

/// Encode a sentence as exactly `embedding_dim` character indices.
///
/// Lowercasing is the caller's job — an uppercase 'A' is an
/// out-of-vocabulary character here and gets dropped.
pub fn encode(sentence: &str, embedding_dim: usize) -> Vec<u32> {
    let mut indices: Vec<u32> = sentence
        .chars()
        .filter_map(char_index)
        .take(embedding_dim)
        .collect();

    // Right-pad with the reserved 0 up to the fixed length.
    indices.resize(embedding_dim, 0);
    indices
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_length_is_always_embedding_dim() {
        for sentence in ["", "a", "hello world", "a very long sentence that keeps going and going"] {
            assert_eq!(encode(sentence, 12).len(), 12);
        }
    }

    #[test]
    fn test_empty_sentence_is_all_zeros() {
        assert_eq!(encode("", 5), vec![0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_letters_then_digits_then_space() {
        // a,b,c → 1,2,3; '1','2','3' → digit block offset by 26
        assert_eq!(
            encode("abc123", 10),
            vec![1, 2, 3, 27, 28, 29, 0, 0, 0, 0]
        );
        assert_eq!(char_index('z'), Some(26));
        assert_eq!(char_index('0'), Some(27));
        assert_eq!(char_index(' '), Some(37));
    }

    #[test]
    fn test_unknown_characters_are_dropped_not_zeroed() {
        // The '!' contributes no entry — 'b' slides into position 2,
        // it is NOT replaced by a 0 placeholder mid-sequence.
        assert_eq!(encode("a!b", 5), vec![1, 2, 0, 0, 0]);
        // Uppercase letters that were not lowercased upstream are
        // out-of-vocabulary too.
        assert_eq!(encode("aAb", 5), vec![1, 2, 0, 0, 0]);
    }

    #[test]
    fn test_overlong_input_is_truncated() {
        assert_eq!(encode("abcdef", 3), vec![1, 2, 3]);
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let sentence = "is this the same question 42";
        assert_eq!(encode(sentence, 80), encode(sentence, 80));
    }
}
