//! Board dimensions
//!
//! Sizes are written `RxC` (rows by columns). A bare `N` is shorthand for a
//! square N×N board, which is also how older highscore files stored sizes.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest row count; rows are labelled `A` through `Z`
pub const MAX_ROWS: usize = 26;

/// Largest column count
pub const MAX_COLS: usize = 26;

/// Validated board dimensions with an even tile count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardSize {
    rows: usize,
    cols: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizeError {
    #[error("'{0}' is not a board size; use the form 4x3")]
    Malformed(String),

    #[error("a board needs 1 to 26 rows and 1 to 26 columns, got {rows}x{cols}")]
    OutOfRange { rows: usize, cols: usize },

    #[error("a {rows}x{cols} board has an odd number of tiles")]
    OddTileCount { rows: usize, cols: usize },
}

impl BoardSize {
    /// The classic 4x4 board
    pub const DEFAULT: Self = Self { rows: 4, cols: 4 };

    /// # Errors
    ///
    /// Returns [`SizeError::OutOfRange`] for empty or oversized grids and
    /// [`SizeError::OddTileCount`] when tiles cannot all be paired.
    ///
    /// # Examples
    /// ```
    /// use memory_game::core::BoardSize;
    ///
    /// let size = BoardSize::new(3, 4).unwrap();
    /// assert_eq!(size.pairs(), 6);
    /// assert!(BoardSize::new(3, 3).is_err());
    /// ```
    pub const fn new(rows: usize, cols: usize) -> Result<Self, SizeError> {
        if rows == 0 || cols == 0 || rows > MAX_ROWS || cols > MAX_COLS {
            return Err(SizeError::OutOfRange { rows, cols });
        }
        if (rows * cols) % 2 != 0 {
            return Err(SizeError::OddTileCount { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    #[inline]
    #[must_use]
    pub const fn rows(self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn cols(self) -> usize {
        self.cols
    }

    #[inline]
    #[must_use]
    pub const fn tiles(self) -> usize {
        self.rows * self.cols
    }

    /// Number of distinct values needed to fill the board
    #[inline]
    #[must_use]
    pub const fn pairs(self) -> usize {
        self.tiles() / 2
    }
}

impl fmt::Display for BoardSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl FromStr for BoardSize {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let malformed = || SizeError::Malformed(text.to_string());
        let number = |part: &str| -> Result<usize, SizeError> {
            let part = part.trim();
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            part.parse().map_err(|_| malformed())
        };

        match text.split_once(['x', 'X', '×']) {
            Some((rows, cols)) => Self::new(number(rows)?, number(cols)?),
            None => {
                let side = number(text)?;
                Self::new(side, side)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rows_by_columns() {
        let size: BoardSize = "4x3".parse().unwrap();
        assert_eq!((size.rows(), size.cols()), (4, 3));
        assert_eq!(size.pairs(), 6);

        assert_eq!("2X5".parse::<BoardSize>().unwrap(), BoardSize::new(2, 5).unwrap());
        assert_eq!(" 6 x 6 ".parse::<BoardSize>().unwrap(), BoardSize::new(6, 6).unwrap());
    }

    #[test]
    fn bare_number_is_square() {
        assert_eq!("6".parse::<BoardSize>().unwrap(), BoardSize::new(6, 6).unwrap());
    }

    #[test]
    fn rejects_odd_tile_counts() {
        assert_eq!(
            "3x3".parse::<BoardSize>(),
            Err(SizeError::OddTileCount { rows: 3, cols: 3 })
        );
        assert!(matches!(
            "5".parse::<BoardSize>(),
            Err(SizeError::OddTileCount { .. })
        ));
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(matches!(
            "0x4".parse::<BoardSize>(),
            Err(SizeError::OutOfRange { .. })
        ));
        assert!(matches!(
            "28x2".parse::<BoardSize>(),
            Err(SizeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_garbage() {
        for input in ["", "x", "4x", "ax4", "4x-2", "4x4x4", "four"] {
            assert!(
                matches!(input.parse::<BoardSize>(), Err(SizeError::Malformed(_))),
                "expected '{input}' to be malformed"
            );
        }
    }

    #[test]
    fn display_round_trip() {
        let size = BoardSize::new(3, 4).unwrap();
        assert_eq!(size.to_string(), "3x4");
        assert_eq!(size.to_string().parse::<BoardSize>().unwrap(), size);
    }

    #[test]
    fn ordering_is_rows_then_columns() {
        let small = BoardSize::new(2, 4).unwrap();
        let large = BoardSize::new(4, 2).unwrap();
        assert!(small < large);
    }
}
