//! Automated play-through of a session

use super::strategy::Strategy;
use crate::game::{ConcealScheduler, GameSession, Immediate, SelectError, SelectOutcome};
use rand::Rng;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("strategy had no tile to pick")]
    NoMove,

    #[error("strategy made an illegal pick: {0}")]
    IllegalPick(#[from] SelectError),

    #[error("game not finished after {0} picks")]
    Stalled(usize),
}

/// Drives a [`GameSession`] to completion with a strategy
///
/// Mismatches are concealed straight away through an [`Immediate`] scheduler.
pub struct Solver<S: Strategy> {
    strategy: S,
    max_picks: usize,
}

impl<S: Strategy> Solver<S> {
    /// Create a new solver with the given strategy
    pub const fn new(strategy: S) -> Self {
        Self {
            strategy,
            max_picks: 1_000_000,
        }
    }

    /// Abort games that need more than `max_picks` selections
    #[must_use]
    pub const fn with_max_picks(mut self, max_picks: usize) -> Self {
        self.max_picks = max_picks;
        self
    }

    /// Play until the session is won, returning the attempt count
    ///
    /// # Errors
    ///
    /// Returns a [`PlayError`] if the strategy runs out of moves, picks an
    /// illegal tile or exceeds the pick limit.
    ///
    /// # Examples
    /// ```
    /// use memory_game::core::BoardSize;
    /// use memory_game::game::GameSession;
    /// use memory_game::solver::{MemoryStrategy, Solver};
    /// use memory_game::wordlists::WordPool;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(11);
    /// let size = BoardSize::new(4, 4).unwrap();
    /// let mut session = GameSession::start(&WordPool::embedded(), size, &mut rng).unwrap();
    ///
    /// let attempts = Solver::new(MemoryStrategy::default()).play(&mut session, &mut rng).unwrap();
    /// assert!(session.is_won());
    /// assert!(attempts >= 8);
    /// ```
    pub fn play<R: Rng + ?Sized>(
        &mut self,
        session: &mut GameSession,
        rng: &mut R,
    ) -> Result<u32, PlayError> {
        self.strategy.reset();
        let mut scheduler = Immediate::default();

        for _ in 0..self.max_picks {
            if session.is_won() {
                return Ok(session.attempts());
            }

            let pick = self.strategy.next_pick(session, rng).ok_or(PlayError::NoMove)?;
            let outcome = session.select(pick)?;

            let revealed = match outcome {
                SelectOutcome::FirstRevealed { coord } => vec![coord],
                SelectOutcome::Matched { pair } | SelectOutcome::Won { pair, .. } => pair.to_vec(),
                SelectOutcome::Mismatched { pair } => {
                    scheduler.on_mismatch(pair, Instant::now());
                    pair.to_vec()
                }
            };
            for coord in revealed {
                if let Ok(value) = session.board().value_at(coord) {
                    self.strategy.observe(coord, value);
                }
            }

            scheduler.poll(session, Instant::now());
        }

        if session.is_won() {
            Ok(session.attempts())
        } else {
            Err(PlayError::Stalled(self.max_picks))
        }
    }
}
