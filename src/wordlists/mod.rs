//! Word lists for memory boards
//!
//! Provides the embedded default list and the [`WordPool`] that samples pair
//! values from it or from a user-supplied file.

mod embedded;
mod pool;

pub use embedded::{WORDS, WORDS_COUNT};
pub use pool::{PoolError, WordPool};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_count_matches_const() {
        assert_eq!(WORDS.len(), WORDS_COUNT);
    }

    #[test]
    fn embedded_words_are_clean() {
        for &word in WORDS {
            assert!(!word.is_empty());
            assert_eq!(word, word.trim(), "Word '{word}' has surrounding whitespace");
            assert!(!word.contains(','), "Word '{word}' contains a comma");
        }
    }

    #[test]
    fn embedded_words_are_distinct() {
        let unique: std::collections::HashSet<_> = WORDS.iter().collect();
        assert_eq!(unique.len(), WORDS.len());
    }

    #[test]
    fn expected_count() {
        assert_eq!(WORDS_COUNT, 66, "Expected 66 embedded words");
    }
}
