//! One playthrough of the memory game
//!
//! `select` is the only state transition. A session moves between
//! [`SessionState::AwaitingFirstPick`] and [`SessionState::AwaitingSecondPick`]
//! until every pair is matched, then stays [`SessionState::Won`].
//!
//! Mismatched tiles stay Revealed after the second pick so the front end can
//! show them; it calls [`GameSession::conceal_mismatch`] when it is done. No
//! tile can be picked until that pair is face down again.

use crate::core::{
    Board, BoardError, BoardSize, Coord, CoordError, RawCoord, TileState, validate,
};
use crate::wordlists::{PoolError, WordPool};
use log::{debug, info};
use rand::Rng;
use thiserror::Error;

/// Where a session is in its pick cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingFirstPick,
    AwaitingSecondPick,
    Won,
}

/// What a successful `select` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// First tile of a pair-attempt is face up; waiting for the second
    FirstRevealed { coord: Coord },
    /// The two tiles matched and are locked open
    Matched { pair: [Coord; 2] },
    /// The two tiles differ and remain Revealed until concealed
    Mismatched { pair: [Coord; 2] },
    /// The last pair was matched
    Won { pair: [Coord; 2], attempts: u32 },
}

/// Rejected selections; the session is left untouched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] CoordError),

    #[error("tile {0} is already revealed or matched")]
    AlreadyRevealedOrMatched(Coord),

    #[error("the game is already won")]
    GameAlreadyWon,

    #[error("tiles {first} and {second} must be concealed before the next pick")]
    MismatchPending { first: Coord, second: Coord },
}

/// Failure to set up a new session
#[derive(Debug, Error)]
pub enum StartError {
    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// State of a single game: board, counters and the pending first pick
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    attempts: u32,
    matched_pairs: usize,
    pending_first: Option<Coord>,
    unresolved_mismatch: Option<[Coord; 2]>,
    won: bool,
}

impl GameSession {
    #[must_use]
    pub const fn new(board: Board) -> Self {
        Self {
            board,
            attempts: 0,
            matched_pairs: 0,
            pending_first: None,
            unresolved_mismatch: None,
            won: false,
        }
    }

    /// Sample words from `pool` and build a fresh board of `size`
    ///
    /// # Errors
    ///
    /// Returns [`StartError::Pool`] if the pool is too small for the board.
    ///
    /// # Examples
    /// ```
    /// use memory_game::core::BoardSize;
    /// use memory_game::game::{GameSession, SessionState};
    /// use memory_game::wordlists::WordPool;
    ///
    /// let pool = WordPool::embedded();
    /// let size = BoardSize::new(4, 4).unwrap();
    /// let session = GameSession::start(&pool, size, &mut rand::rng()).unwrap();
    ///
    /// assert_eq!(session.total_pairs(), 8);
    /// assert_eq!(session.state(), SessionState::AwaitingFirstPick);
    /// ```
    pub fn start<R: Rng + ?Sized>(
        pool: &WordPool,
        size: BoardSize,
        rng: &mut R,
    ) -> Result<Self, StartError> {
        let words = pool.sample(size.pairs(), rng)?;
        let board = Board::build(&words, size.rows(), size.cols(), rng)?;
        info!("new {size} game with {} pairs", size.pairs());
        Ok(Self::new(board))
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        if self.won {
            SessionState::Won
        } else if self.pending_first.is_some() {
            SessionState::AwaitingSecondPick
        } else {
            SessionState::AwaitingFirstPick
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_won(&self) -> bool {
        self.won
    }

    /// Completed pair comparisons so far
    #[inline]
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    #[inline]
    #[must_use]
    pub const fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    #[inline]
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.board.total_pairs()
    }

    #[inline]
    #[must_use]
    pub const fn pending_first(&self) -> Option<Coord> {
        self.pending_first
    }

    /// The mismatched pair blocking further picks, while either tile is face up
    #[inline]
    #[must_use]
    pub const fn unresolved_mismatch(&self) -> Option<[Coord; 2]> {
        self.unresolved_mismatch
    }

    #[inline]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Board dimensions, as used for highscore keys
    ///
    /// `None` only for hand-made layouts beyond [`BoardSize`] limits.
    #[must_use]
    pub fn size(&self) -> Option<BoardSize> {
        BoardSize::new(self.board.rows(), self.board.cols()).ok()
    }

    /// Validate player text against the board, then select it
    ///
    /// # Errors
    /// See [`GameSession::select`]; malformed or off-board text yields
    /// [`SelectError::InvalidCoordinate`].
    pub fn select_text(&mut self, text: &str) -> Result<SelectOutcome, SelectError> {
        if self.won {
            return Err(SelectError::GameAlreadyWon);
        }
        let coord = validate(text, self.board.rows(), self.board.cols())?;
        self.select(coord)
    }

    /// Pick a tile
    ///
    /// # Errors
    ///
    /// - [`SelectError::GameAlreadyWon`] once every pair is matched
    /// - [`SelectError::MismatchPending`] until the last mismatch is concealed
    /// - [`SelectError::InvalidCoordinate`] for coordinates off the board
    /// - [`SelectError::AlreadyRevealedOrMatched`] unless the tile is Hidden,
    ///   which includes picking the pending first tile again
    ///
    /// A rejected pick never changes the session.
    pub fn select(&mut self, coord: Coord) -> Result<SelectOutcome, SelectError> {
        if self.won {
            return Err(SelectError::GameAlreadyWon);
        }
        if let Some([first, second]) = self.unresolved_mismatch {
            return Err(SelectError::MismatchPending { first, second });
        }

        match self.board.state_at(coord) {
            Ok(TileState::Hidden) => {}
            Ok(TileState::Revealed | TileState::Matched) => {
                return Err(SelectError::AlreadyRevealedOrMatched(coord));
            }
            Err(_) => {
                return Err(SelectError::InvalidCoordinate(CoordError::OutOfRange {
                    coord: RawCoord::Numeric {
                        row: coord.row,
                        col: coord.col,
                    },
                    rows: self.board.rows(),
                    cols: self.board.cols(),
                }));
            }
        }

        self.reveal_hidden(coord);

        let Some(first) = self.pending_first.take() else {
            self.pending_first = Some(coord);
            debug!("first pick {coord}");
            return Ok(SelectOutcome::FirstRevealed { coord });
        };

        self.attempts += 1;
        let pair = [first, coord];

        if self.board.value_at(first) == self.board.value_at(coord) {
            for tile in pair {
                self.mark_revealed_matched(tile);
            }
            self.matched_pairs += 1;
            debug!("matched {first} and {coord} on attempt {}", self.attempts);

            if self.matched_pairs == self.total_pairs() {
                self.won = true;
                info!("game won in {} attempts", self.attempts);
                return Ok(SelectOutcome::Won {
                    pair,
                    attempts: self.attempts,
                });
            }
            Ok(SelectOutcome::Matched { pair })
        } else {
            self.unresolved_mismatch = Some(pair);
            debug!("mismatch {first} and {coord} on attempt {}", self.attempts);
            Ok(SelectOutcome::Mismatched { pair })
        }
    }

    /// Turn a revealed tile face down
    ///
    /// # Errors
    /// Propagates [`BoardError`] for matched or off-board tiles.
    pub fn conceal(&mut self, coord: Coord) -> Result<(), BoardError> {
        self.board.conceal(coord)?;
        if let Some(pair) = self.unresolved_mismatch
            && pair
                .iter()
                .all(|&c| self.board.state_at(c) == Ok(TileState::Hidden))
        {
            self.unresolved_mismatch = None;
        }
        Ok(())
    }

    /// Flip the unresolved mismatched pair back over, returning it
    ///
    /// Does nothing if there is no unresolved mismatch.
    pub fn conceal_mismatch(&mut self) -> Option<[Coord; 2]> {
        let pair = self.unresolved_mismatch.take()?;
        for coord in pair {
            let concealed = self.board.conceal(coord);
            debug_assert!(concealed.is_ok(), "mismatched tile {coord}: {concealed:?}");
        }
        Some(pair)
    }

    fn reveal_hidden(&mut self, coord: Coord) {
        // Caller checked the tile is Hidden and on the board
        let revealed = self.board.reveal(coord);
        debug_assert!(revealed.is_ok(), "reveal {coord}: {revealed:?}");
    }

    fn mark_revealed_matched(&mut self, coord: Coord) {
        // Both tiles of a comparison are Revealed at this point
        let matched = self.board.mark_matched(coord);
        debug_assert!(matched.is_ok(), "match {coord}: {matched:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session(rows: usize, cols: usize, layout: &[&str]) -> GameSession {
        let values = layout.iter().map(|v| (*v).to_string()).collect();
        GameSession::new(Board::from_layout(rows, cols, values).unwrap())
    }

    // A B
    // B A
    fn two_pair_session() -> GameSession {
        session(2, 2, &["a", "b", "b", "a"])
    }

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    #[test]
    fn first_pick_reveals_without_counting() {
        let mut game = two_pair_session();
        let outcome = game.select(c(0, 0)).unwrap();

        assert_eq!(outcome, SelectOutcome::FirstRevealed { coord: c(0, 0) });
        assert_eq!(game.state(), SessionState::AwaitingSecondPick);
        assert_eq!(game.pending_first(), Some(c(0, 0)));
        assert_eq!(game.attempts(), 0);
        assert_eq!(game.board().state_at(c(0, 0)).unwrap(), TileState::Revealed);
    }

    #[test]
    fn matching_pair_locks_open() {
        let mut game = two_pair_session();
        game.select(c(0, 0)).unwrap();
        let outcome = game.select(c(1, 1)).unwrap();

        assert_eq!(outcome, SelectOutcome::Matched { pair: [c(0, 0), c(1, 1)] });
        assert_eq!(game.attempts(), 1);
        assert_eq!(game.matched_pairs(), 1);
        assert_eq!(game.pending_first(), None);
        assert_eq!(game.state(), SessionState::AwaitingFirstPick);
        assert_eq!(game.board().state_at(c(0, 0)).unwrap(), TileState::Matched);
        assert_eq!(game.board().state_at(c(1, 1)).unwrap(), TileState::Matched);
    }

    #[test]
    fn mismatch_stays_revealed_until_concealed() {
        let mut game = two_pair_session();
        game.select(c(0, 0)).unwrap();
        let outcome = game.select(c(0, 1)).unwrap();

        assert_eq!(outcome, SelectOutcome::Mismatched { pair: [c(0, 0), c(0, 1)] });
        assert_eq!(game.attempts(), 1);
        assert_eq!(game.matched_pairs(), 0);
        assert_eq!(game.unresolved_mismatch(), Some([c(0, 0), c(0, 1)]));
        assert_eq!(game.board().state_at(c(0, 1)).unwrap(), TileState::Revealed);

        // Still face up: nothing can be picked yet
        assert_eq!(
            game.select(c(0, 0)),
            Err(SelectError::MismatchPending {
                first: c(0, 0),
                second: c(0, 1)
            })
        );

        assert_eq!(game.conceal_mismatch(), Some([c(0, 0), c(0, 1)]));
        assert_eq!(game.unresolved_mismatch(), None);
        assert_eq!(game.board().state_at(c(0, 0)).unwrap(), TileState::Hidden);
        assert_eq!(game.board().state_at(c(0, 1)).unwrap(), TileState::Hidden);
        assert_eq!(game.conceal_mismatch(), None);
    }

    #[test]
    fn individual_conceal_clears_mismatch_once_both_hidden() {
        let mut game = two_pair_session();
        game.select(c(0, 0)).unwrap();
        game.select(c(0, 1)).unwrap();

        game.conceal(c(0, 0)).unwrap();
        assert!(game.unresolved_mismatch().is_some());
        game.conceal(c(0, 1)).unwrap();
        assert!(game.unresolved_mismatch().is_none());

        // Idempotent on hidden tiles
        game.conceal(c(0, 1)).unwrap();
    }

    #[test]
    fn second_mismatch_waits_for_the_first_to_be_concealed() {
        // a b c d
        // a b c d
        let mut game = session(2, 4, &["a", "b", "c", "d", "a", "b", "c", "d"]);
        game.select(c(0, 0)).unwrap();
        game.select(c(0, 1)).unwrap();
        let before = game.clone();

        assert_eq!(
            game.select(c(0, 2)),
            Err(SelectError::MismatchPending {
                first: c(0, 0),
                second: c(0, 1)
            })
        );
        assert_eq!(game.board(), before.board());
        assert_eq!(game.attempts(), 1);
        assert_eq!(game.pending_first(), None);

        assert_eq!(game.conceal_mismatch(), Some([c(0, 0), c(0, 1)]));
        game.select(c(0, 2)).unwrap();
        game.select(c(0, 3)).unwrap();
        assert_eq!(game.conceal_mismatch(), Some([c(0, 2), c(0, 3)]));

        assert_eq!(game.attempts(), 2);
        assert_eq!(game.board().coords_in(TileState::Revealed).count(), 0);
        assert_eq!(game.unresolved_mismatch(), None);

        // Every tile can still be cleared
        for col in 0..4 {
            game.select(c(0, col)).unwrap();
            game.select(c(1, col)).unwrap();
        }
        assert!(game.is_won());
        assert_eq!(game.attempts(), 6);
    }

    #[test]
    fn concealing_tiles_one_by_one_unblocks_picks() {
        let mut game = two_pair_session();
        game.select(c(0, 0)).unwrap();
        game.select(c(0, 1)).unwrap();

        game.conceal(c(0, 1)).unwrap();
        assert!(matches!(
            game.select(c(0, 1)),
            Err(SelectError::MismatchPending { .. })
        ));
        game.conceal(c(0, 0)).unwrap();
        assert_eq!(
            game.select(c(0, 1)),
            Ok(SelectOutcome::FirstRevealed { coord: c(0, 1) })
        );
    }

    #[test]
    fn same_tile_twice_is_rejected() {
        let mut game = session(2, 2, &["a", "b", "b", "a"]);
        game.select(c(1, 1)).unwrap();
        let before = game.clone();

        assert_eq!(
            game.select(c(1, 1)),
            Err(SelectError::AlreadyRevealedOrMatched(c(1, 1)))
        );
        assert_eq!(game.attempts(), before.attempts());
        assert_eq!(game.pending_first(), Some(c(1, 1)));
        assert_eq!(game.board(), before.board());
    }

    #[test]
    fn matched_tile_is_rejected() {
        let mut game = two_pair_session();
        game.select(c(0, 0)).unwrap();
        game.select(c(1, 1)).unwrap();

        assert_eq!(
            game.select(c(1, 1)),
            Err(SelectError::AlreadyRevealedOrMatched(c(1, 1)))
        );
        game.select(c(0, 1)).unwrap();
        assert_eq!(
            game.select(c(0, 0)),
            Err(SelectError::AlreadyRevealedOrMatched(c(0, 0)))
        );
        assert_eq!(game.attempts(), 1);
    }

    #[test]
    fn invalid_text_leaves_state_untouched() {
        let values: Vec<String> = (0..8).map(|i| format!("w{i}")).collect();
        let mut game = GameSession::new(
            Board::build(&values, 4, 4, &mut StdRng::seed_from_u64(5)).unwrap(),
        );
        let before = game.clone();

        assert!(matches!(
            game.select_text("Z9"),
            Err(SelectError::InvalidCoordinate(CoordError::OutOfRange { .. }))
        ));
        assert!(matches!(
            game.select_text("??"),
            Err(SelectError::InvalidCoordinate(CoordError::Malformed { .. }))
        ));
        assert!(matches!(
            game.select(c(4, 0)),
            Err(SelectError::InvalidCoordinate(_))
        ));

        assert_eq!(game.attempts(), before.attempts());
        assert_eq!(game.matched_pairs(), before.matched_pairs());
        assert_eq!(game.board(), before.board());
        assert_eq!(game.state(), SessionState::AwaitingFirstPick);
    }

    #[test]
    fn single_pair_board_wins_in_one_attempt() {
        let mut game = session(1, 2, &["cat", "cat"]);
        game.select_text("A1").unwrap();
        let outcome = game.select_text("A2").unwrap();

        assert_eq!(
            outcome,
            SelectOutcome::Won {
                pair: [c(0, 0), c(0, 1)],
                attempts: 1
            }
        );
        assert_eq!(game.state(), SessionState::Won);
        assert!(game.is_won());
    }

    #[test]
    fn nothing_succeeds_after_win() {
        let mut game = session(1, 2, &["cat", "cat"]);
        game.select(c(0, 0)).unwrap();
        game.select(c(0, 1)).unwrap();

        assert_eq!(game.select(c(0, 0)), Err(SelectError::GameAlreadyWon));
        assert_eq!(game.select_text("nonsense"), Err(SelectError::GameAlreadyWon));
        assert_eq!(game.attempts(), 1);
    }

    #[test]
    fn full_game_counts_each_comparison_once() {
        let mut game = two_pair_session();

        game.select(c(0, 0)).unwrap();
        game.select(c(0, 1)).unwrap(); // miss
        game.conceal_mismatch();
        game.select(c(0, 0)).unwrap();
        game.select(c(1, 1)).unwrap(); // a
        game.select(c(0, 1)).unwrap();
        let outcome = game.select(c(1, 0)).unwrap(); // b

        assert_eq!(
            outcome,
            SelectOutcome::Won {
                pair: [c(0, 1), c(1, 0)],
                attempts: 3
            }
        );
        assert_eq!(game.matched_pairs(), game.total_pairs());
    }

    #[test]
    fn start_samples_the_right_number_of_pairs() {
        let pool = WordPool::from_words(["a", "b", "c", "d", "e", "f"]);
        let size = BoardSize::new(3, 4).unwrap();
        let game = GameSession::start(&pool, size, &mut StdRng::seed_from_u64(8)).unwrap();

        assert_eq!(game.total_pairs(), 6);
        assert_eq!(game.size(), Some(size));
    }

    #[test]
    fn start_fails_before_building_when_pool_is_small() {
        let pool = WordPool::from_words(["a", "b"]);
        let size = BoardSize::new(2, 3).unwrap();
        assert!(matches!(
            GameSession::start(&pool, size, &mut StdRng::seed_from_u64(8)),
            Err(StartError::Pool(PoolError::InsufficientCandidates { needed: 3, available: 2 }))
        ));
    }
}
