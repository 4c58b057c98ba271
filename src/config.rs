//! Runtime settings shared by every front end

use crate::core::BoardSize;
use crate::highscores::{DEFAULT_CAP, HighscoreLedger, KeyStyle, LedgerError};
use crate::wordlists::{PoolError, WordPool};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_SIZE: BoardSize = BoardSize::DEFAULT;
pub const DEFAULT_SCORES_PATH: &str = "highscores.txt";
pub const DEFAULT_PLAYER: &str = "Player";
pub const DEFAULT_CONCEAL_DELAY: Duration = Duration::from_millis(1000);

/// Where the candidate words come from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WordSource {
    /// The list compiled into the binary
    #[default]
    Embedded,
    /// One word per line in a text file
    File(PathBuf),
}

impl WordSource {
    /// Load the pool, checking it can fill a board of `size`
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::SourceUnavailable`] if the file cannot be read and
    /// [`PoolError::InsufficientCandidates`] if the pool is too small.
    pub fn pool_for(&self, size: BoardSize) -> Result<WordPool, PoolError> {
        match self {
            Self::Embedded => {
                let pool = WordPool::embedded();
                pool.ensure_capacity(size.pairs())?;
                Ok(pool)
            }
            Self::File(path) => WordPool::load_for(path, size.pairs()),
        }
    }
}

impl FromStr for WordSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "embedded" | "builtin" => Self::Embedded,
            path => Self::File(PathBuf::from(path)),
        })
    }
}

impl fmt::Display for WordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Everything a front end needs to set up games
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub words: WordSource,
    pub scores_path: PathBuf,
    pub size: BoardSize,
    pub player: String,
    pub cap: usize,
    pub key_style: KeyStyle,
    pub conceal_delay: Duration,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            words: WordSource::Embedded,
            scores_path: PathBuf::from(DEFAULT_SCORES_PATH),
            size: DEFAULT_SIZE,
            player: DEFAULT_PLAYER.to_string(),
            cap: DEFAULT_CAP,
            key_style: KeyStyle::default(),
            conceal_delay: DEFAULT_CONCEAL_DELAY,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Seeded generator when `seed` is set, otherwise one seeded from the thread RNG
    #[must_use]
    pub fn rng(&self) -> StdRng {
        self.seed.map_or_else(
            || StdRng::from_rng(&mut rand::rng()),
            StdRng::seed_from_u64,
        )
    }

    /// Word pool sized for the configured board
    ///
    /// # Errors
    ///
    /// See [`WordSource::pool_for`].
    pub fn pool(&self) -> Result<WordPool, PoolError> {
        self.words.pool_for(self.size)
    }

    /// Highscores from `scores_path`, empty on first run
    ///
    /// # Errors
    ///
    /// See [`HighscoreLedger::load_or_default`].
    pub fn ledger(&self) -> Result<HighscoreLedger, LedgerError> {
        HighscoreLedger::load_or_default(&self.scores_path, self.cap, self.key_style)
    }
}
