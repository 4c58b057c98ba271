//! Candidate word pool
//!
//! Loads distinct tile words from a file or the embedded list and samples the
//! pair values for a board.

use super::WORDS;
use log::{debug, warn};
use rand::Rng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Character that separates highscore fields; words may not contain it
const FORBIDDEN_DELIMITER: char = ',';

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("cannot read word list {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("need {needed} distinct words but only {available} are available")]
    InsufficientCandidates { needed: usize, available: usize },
}

/// A list of distinct candidate tile values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Build a pool from any list of tokens
    ///
    /// Tokens are trimmed; blanks, repeats and tokens containing a comma are
    /// dropped with a warning.
    ///
    /// # Examples
    /// ```
    /// use memory_game::wordlists::WordPool;
    ///
    /// let pool = WordPool::from_words(["owl", "fox", "owl", ""]);
    /// assert_eq!(pool.len(), 2);
    /// ```
    pub fn from_words<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let mut words = Vec::new();

        for token in tokens {
            let word = token.as_ref().trim();
            if word.is_empty() {
                continue;
            }
            if word.contains(FORBIDDEN_DELIMITER) {
                warn!("skipping word '{word}': contains '{FORBIDDEN_DELIMITER}'");
                continue;
            }
            if !seen.insert(word.to_string()) {
                warn!("skipping duplicate word '{word}'");
                continue;
            }
            words.push(word.to_string());
        }

        Self { words }
    }

    /// The word list compiled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_words(WORDS)
    }

    /// Load one candidate per line from a UTF-8 file
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::SourceUnavailable`] if the file cannot be read.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PoolError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PoolError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;

        let pool = Self::from_words(content.lines());
        debug!("loaded {} words from {}", pool.len(), path.display());
        Ok(pool)
    }

    /// Load a pool that must hold at least `pairs` words
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::SourceUnavailable`] if the file cannot be read and
    /// [`PoolError::InsufficientCandidates`] if it is too small.
    pub fn load_for<P: AsRef<Path>>(path: P, pairs: usize) -> Result<Self, PoolError> {
        let pool = Self::load(path)?;
        pool.ensure_capacity(pairs)?;
        Ok(pool)
    }

    /// # Errors
    ///
    /// Returns [`PoolError::InsufficientCandidates`] if fewer than `pairs`
    /// words are available.
    pub fn ensure_capacity(&self, pairs: usize) -> Result<(), PoolError> {
        if self.words.len() < pairs {
            return Err(PoolError::InsufficientCandidates {
                needed: pairs,
                available: self.words.len(),
            });
        }
        Ok(())
    }

    /// Pick `pairs` distinct words uniformly at random
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InsufficientCandidates`] rather than returning a
    /// short sample.
    pub fn sample<R: Rng + ?Sized>(&self, pairs: usize, rng: &mut R) -> Result<Vec<String>, PoolError> {
        self.ensure_capacity(pairs)?;
        Ok(self.words.choose_multiple(rng, pairs).cloned().collect())
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }
}
