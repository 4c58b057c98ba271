//! Memory board: tile values and their reveal state
//!
//! Values are laid out once at construction and never change. The parallel
//! state grid moves tiles between Hidden, Revealed and Matched.

use super::Coord;
use rand::Rng;
use rand::seq::SliceRandom;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use thiserror::Error;

/// Visibility of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileState {
    Hidden,
    Revealed,
    Matched,
}

impl TileState {
    /// Whether the value should be shown to the player
    #[inline]
    #[must_use]
    pub const fn is_face_up(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Errors raised by board construction and tile transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("a {rows}x{cols} board needs {needed} distinct values, got {given}")]
    InvalidDimensions {
        rows: usize,
        cols: usize,
        needed: usize,
        given: usize,
    },

    #[error("value '{0}' appears more than once in the pair set")]
    DuplicateValue(String),

    #[error("value '{value}' occupies {count} tiles instead of 2")]
    UnpairedValue { value: String, count: usize },

    #[error("{coord} is outside the {rows}x{cols} board")]
    OutOfBounds {
        coord: Coord,
        rows: usize,
        cols: usize,
    },

    #[error("tile {0} is already revealed or matched")]
    AlreadyRevealedOrMatched(Coord),

    #[error("tile {0} is matched and cannot be concealed")]
    TileMatched(Coord),

    #[error("tile {0} must be revealed before it can be matched")]
    NotRevealed(Coord),
}

/// An R×C grid where every value occupies exactly two tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    values: Vec<String>,
    states: Vec<TileState>,
}

impl Board {
    /// Build a shuffled board from a set of distinct pair values
    ///
    /// Each value is duplicated, the sequence is shuffled uniformly and laid
    /// out row-major. All tiles start Hidden.
    ///
    /// # Errors
    ///
    /// - [`BoardError::InvalidDimensions`] if `rows * cols` is zero or is not
    ///   exactly twice the number of values
    /// - [`BoardError::DuplicateValue`] if `values` repeats an entry
    ///
    /// # Examples
    /// ```
    /// use memory_game::core::{Board, Coord};
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let words = vec!["cat".to_string(), "dog".to_string()];
    /// let board = Board::build(&words, 2, 2, &mut rng).unwrap();
    ///
    /// assert_eq!(board.len(), 4);
    /// assert_eq!(board.positions_of("cat").len(), 2);
    /// ```
    pub fn build<R: Rng + ?Sized>(
        values: &[String],
        rows: usize,
        cols: usize,
        rng: &mut R,
    ) -> Result<Self, BoardError> {
        let cells = rows.checked_mul(cols).unwrap_or(0);
        if cells == 0 || cells != values.len() * 2 {
            return Err(BoardError::InvalidDimensions {
                rows,
                cols,
                needed: cells / 2,
                given: values.len(),
            });
        }

        let mut seen = FxHashSet::default();
        if let Some(dup) = values.iter().find(|v| !seen.insert(v.as_str())) {
            return Err(BoardError::DuplicateValue(dup.clone()));
        }

        let mut tiles: Vec<String> = values
            .iter()
            .flat_map(|value| [value.clone(), value.clone()])
            .collect();
        tiles.shuffle(rng);

        Ok(Self::laid_out(rows, cols, tiles))
    }

    /// Board with an explicit row-major layout, skipping the shuffle
    ///
    /// Used by tests and replays. The layout must fill the grid and hold
    /// every value exactly twice.
    ///
    /// # Errors
    ///
    /// - [`BoardError::InvalidDimensions`] if the grid is empty or its tile
    ///   count differs from `values.len()`
    /// - [`BoardError::UnpairedValue`] if a value does not occupy exactly two
    ///   tiles
    pub fn from_layout(rows: usize, cols: usize, values: Vec<String>) -> Result<Self, BoardError> {
        let cells = rows.checked_mul(cols).unwrap_or(0);
        if cells == 0 || cells != values.len() {
            return Err(BoardError::InvalidDimensions {
                rows,
                cols,
                needed: cells / 2,
                given: values.len() / 2,
            });
        }

        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for value in &values {
            *counts.entry(value.as_str()).or_default() += 1;
        }
        // First offending value in layout order, so the error is stable
        if let Some((value, count)) = values
            .iter()
            .map(|v| (v, counts[v.as_str()]))
            .find(|&(_, count)| count != 2)
        {
            return Err(BoardError::UnpairedValue {
                value: value.clone(),
                count,
            });
        }

        Ok(Self::laid_out(rows, cols, values))
    }

    fn laid_out(rows: usize, cols: usize, values: Vec<String>) -> Self {
        Self {
            rows,
            cols,
            states: vec![TileState::Hidden; values.len()],
            values,
        }
    }

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of tiles
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.values.len() / 2
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    fn index_of(&self, coord: Coord) -> Result<usize, BoardError> {
        if self.contains(coord) {
            Ok(coord.index(self.cols))
        } else {
            Err(BoardError::OutOfBounds {
                coord,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Value under a tile, regardless of its state
    ///
    /// # Errors
    /// Returns [`BoardError::OutOfBounds`] for coordinates off the grid.
    pub fn value_at(&self, coord: Coord) -> Result<&str, BoardError> {
        let index = self.index_of(coord)?;
        Ok(&self.values[index])
    }

    /// # Errors
    /// Returns [`BoardError::OutOfBounds`] for coordinates off the grid.
    pub fn state_at(&self, coord: Coord) -> Result<TileState, BoardError> {
        let index = self.index_of(coord)?;
        Ok(self.states[index])
    }

    /// Turn a hidden tile face up
    ///
    /// # Errors
    /// Returns [`BoardError::AlreadyRevealedOrMatched`] unless the tile is Hidden.
    pub fn reveal(&mut self, coord: Coord) -> Result<(), BoardError> {
        let index = self.index_of(coord)?;
        match self.states[index] {
            TileState::Hidden => {
                self.states[index] = TileState::Revealed;
                Ok(())
            }
            TileState::Revealed | TileState::Matched => {
                Err(BoardError::AlreadyRevealedOrMatched(coord))
            }
        }
    }

    /// Turn a revealed tile face down again; hidden tiles are left alone
    ///
    /// # Errors
    /// Returns [`BoardError::TileMatched`] for matched tiles, which stay open.
    pub fn conceal(&mut self, coord: Coord) -> Result<(), BoardError> {
        let index = self.index_of(coord)?;
        match self.states[index] {
            TileState::Revealed | TileState::Hidden => {
                self.states[index] = TileState::Hidden;
                Ok(())
            }
            TileState::Matched => Err(BoardError::TileMatched(coord)),
        }
    }

    /// Lock a revealed tile open permanently
    ///
    /// # Errors
    /// Returns [`BoardError::NotRevealed`] unless the tile is Revealed.
    pub fn mark_matched(&mut self, coord: Coord) -> Result<(), BoardError> {
        let index = self.index_of(coord)?;
        match self.states[index] {
            TileState::Revealed => {
                self.states[index] = TileState::Matched;
                Ok(())
            }
            TileState::Hidden | TileState::Matched => Err(BoardError::NotRevealed(coord)),
        }
    }

    /// Every coordinate holding `value`
    #[must_use]
    pub fn positions_of(&self, value: &str) -> Vec<Coord> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.as_str() == value)
            .map(|(i, _)| Coord::from_index(i, self.cols))
            .collect()
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = (Coord, &str, TileState)> + '_ {
        self.values
            .iter()
            .zip(&self.states)
            .enumerate()
            .map(|(i, (value, &state))| (Coord::from_index(i, self.cols), value.as_str(), state))
    }

    /// Coordinates currently in the given state
    pub fn coords_in(&self, state: TileState) -> impl Iterator<Item = Coord> + '_ {
        self.tiles()
            .filter(move |&(_, _, s)| s == state)
            .map(|(coord, _, _)| coord)
    }

    /// Longest tile value, in characters
    #[must_use]
    pub fn widest_value(&self) -> usize {
        self.values
            .iter()
            .map(|v| v.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// Plain grid dump: face-up values, `---` for hidden tiles
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.widest_value().max(3);
        for row in 0..self.rows {
            let line: Vec<String> = (0..self.cols)
                .map(|col| {
                    let index = Coord::new(row, col).index(self.cols);
                    if self.states[index].is_face_up() {
                        format!("{:>width$}", self.values[index])
                    } else {
                        format!("{:>width$}", "---")
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| (*w).to_string()).collect()
    }

    fn fixed_board() -> Board {
        // cat dog
        // dog cat
        Board::from_layout(2, 2, words(&["cat", "dog", "dog", "cat"])).unwrap()
    }

    #[test]
    fn build_places_every_value_twice() {
        let mut rng = StdRng::seed_from_u64(1);
        let values = words(&["a", "b", "c", "d", "e", "f"]);
        let board = Board::build(&values, 3, 4, &mut rng).unwrap();

        assert_eq!(board.len(), 12);
        assert_eq!(board.total_pairs(), 6);

        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for (_, value, state) in board.tiles() {
            assert_eq!(state, TileState::Hidden);
            *counts.entry(value).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn build_rejects_mismatched_dimensions() {
        let mut rng = StdRng::seed_from_u64(1);
        let values = words(&["a", "b", "c"]);
        assert!(matches!(
            Board::build(&values, 2, 2, &mut rng),
            Err(BoardError::InvalidDimensions { needed: 2, given: 3, .. })
        ));
        assert!(matches!(
            Board::build(&[], 0, 0, &mut rng),
            Err(BoardError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn build_rejects_duplicate_values() {
        let mut rng = StdRng::seed_from_u64(1);
        let values = words(&["a", "a"]);
        assert_eq!(
            Board::build(&values, 2, 2, &mut rng),
            Err(BoardError::DuplicateValue("a".to_string()))
        );
    }

    #[test]
    fn layout_must_pair_every_value() {
        assert_eq!(
            Board::from_layout(2, 2, words(&["a", "b", "c", "d"])),
            Err(BoardError::UnpairedValue {
                value: "a".to_string(),
                count: 1
            })
        );
        assert_eq!(
            Board::from_layout(1, 4, words(&["a", "a", "a", "b"])),
            Err(BoardError::UnpairedValue {
                value: "a".to_string(),
                count: 3
            })
        );
        assert!(matches!(
            Board::from_layout(2, 2, words(&["a", "a"])),
            Err(BoardError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Board::from_layout(0, 2, Vec::new()),
            Err(BoardError::InvalidDimensions { .. })
        ));

        let board = Board::from_layout(1, 4, words(&["a", "b", "b", "a"])).unwrap();
        assert_eq!(board.total_pairs(), 2);
    }

    #[test]
    fn build_is_deterministic_for_a_seed() {
        let values = words(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let first = Board::build(&values, 4, 4, &mut StdRng::seed_from_u64(99)).unwrap();
        let second = Board::build(&values, 4, 4, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn shuffle_is_roughly_uniform() {
        // Two values on a 1x4 strip have 4!/(2!2!) = 6 distinct layouts
        let values = words(&["a", "b"]);
        let mut rng = StdRng::seed_from_u64(2024);
        let trials = 6000;
        let mut counts: FxHashMap<String, usize> = FxHashMap::default();

        for _ in 0..trials {
            let board = Board::build(&values, 1, 4, &mut rng).unwrap();
            let layout: String = board.tiles().map(|(_, v, _)| v).collect();
            *counts.entry(layout).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        let expected = trials as f64 / 6.0;
        let chi_square: f64 = counts
            .values()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        // 5 degrees of freedom; p = 0.001 critical value is 20.5
        assert!(chi_square < 20.5, "chi-square too large: {chi_square:.2}");
    }

    #[test]
    fn reveal_then_conceal() {
        let mut board = fixed_board();
        let coord = Coord::new(0, 1);

        board.reveal(coord).unwrap();
        assert_eq!(board.state_at(coord).unwrap(), TileState::Revealed);
        assert_eq!(
            board.reveal(coord),
            Err(BoardError::AlreadyRevealedOrMatched(coord))
        );

        board.conceal(coord).unwrap();
        assert_eq!(board.state_at(coord).unwrap(), TileState::Hidden);

        // Idempotent on hidden tiles
        board.conceal(coord).unwrap();
        assert_eq!(board.state_at(coord).unwrap(), TileState::Hidden);
    }

    #[test]
    fn matched_tiles_are_locked_open() {
        let mut board = fixed_board();
        let coord = Coord::new(0, 0);

        assert_eq!(board.mark_matched(coord), Err(BoardError::NotRevealed(coord)));
        board.reveal(coord).unwrap();
        board.mark_matched(coord).unwrap();

        assert_eq!(board.state_at(coord).unwrap(), TileState::Matched);
        assert_eq!(board.conceal(coord), Err(BoardError::TileMatched(coord)));
        assert_eq!(
            board.reveal(coord),
            Err(BoardError::AlreadyRevealedOrMatched(coord))
        );
    }

    #[test]
    fn out_of_bounds_access() {
        let mut board = fixed_board();
        let coord = Coord::new(2, 0);
        let expected = BoardError::OutOfBounds {
            coord,
            rows: 2,
            cols: 2,
        };

        assert_eq!(board.value_at(coord), Err(expected.clone()));
        assert_eq!(board.state_at(coord), Err(expected.clone()));
        assert_eq!(board.reveal(coord), Err(expected));
    }

    #[test]
    fn positions_and_values() {
        let board = fixed_board();
        assert_eq!(
            board.positions_of("cat"),
            vec![Coord::new(0, 0), Coord::new(1, 1)]
        );
        assert_eq!(board.value_at(Coord::new(1, 0)).unwrap(), "dog");
        assert!(board.positions_of("eel").is_empty());
    }

    #[test]
    fn display_hides_face_down_tiles() {
        let mut board = fixed_board();
        board.reveal(Coord::new(0, 0)).unwrap();
        assert_eq!(board.to_string(), "cat ---\n--- ---\n");
    }
}
