//! Board coordinates and move validation
//!
//! Players name a tile either as `B3` (row letter, 1-based column as printed on
//! the board header) or as two zero-based integers such as `1 2` or `1,2`.
//! Validation is a pure function of the text and the board bounds.

use std::fmt;
use thiserror::Error;

/// A zero-based (row, column) position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index into a grid with `cols` columns
    #[inline]
    #[must_use]
    pub const fn index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    /// Inverse of [`Coord::index`]
    #[inline]
    #[must_use]
    pub const fn from_index(index: usize, cols: usize) -> Self {
        Self {
            row: index / cols,
            col: index % cols,
        }
    }
}

/// Formats as the letter/number label shown on the board, e.g. `B3`
///
/// Rows past `Z` fall back to the numeric `row,col` form.
impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match row_letter(self.row) {
            Some(letter) => write!(f, "{letter}{}", self.col + 1),
            None => write!(f, "{},{}", self.row, self.col),
        }
    }
}

/// Letter used for a row label, `A` for row 0
#[must_use]
pub fn row_letter(row: usize) -> Option<char> {
    u8::try_from(row)
        .ok()
        .filter(|&r| r < 26)
        .map(|r| char::from(b'A' + r))
}

/// Why a coordinate text was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("'{input}' is not a coordinate: {reason}")]
    Malformed { input: String, reason: &'static str },

    #[error("{coord} is outside the {rows}x{cols} board")]
    OutOfRange {
        coord: RawCoord,
        rows: usize,
        cols: usize,
    },
}

/// A parsed but not yet bounds-checked coordinate
///
/// Kept separate from [`Coord`] because a 1-based column of `0` has no
/// zero-based equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawCoord {
    Labelled { row: usize, col_one_based: usize },
    Numeric { row: usize, col: usize },
}

impl fmt::Display for RawCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Labelled { row, col_one_based } => match row_letter(row) {
                Some(letter) => write!(f, "{letter}{col_one_based}"),
                None => write!(f, "row {row}, column {col_one_based}"),
            },
            Self::Numeric { row, col } => write!(f, "({row}, {col})"),
        }
    }
}

impl RawCoord {
    fn resolve(self, rows: usize, cols: usize) -> Option<Coord> {
        let (row, col) = match self {
            Self::Labelled { row, col_one_based } => (row, col_one_based.checked_sub(1)?),
            Self::Numeric { row, col } => (row, col),
        };
        (row < rows && col < cols).then_some(Coord { row, col })
    }
}

/// Validate a coordinate typed by the player against the board bounds
///
/// # Errors
///
/// Returns [`CoordError::Malformed`] for text that is not a coordinate at all
/// and [`CoordError::OutOfRange`] for a well-formed coordinate off the board.
///
/// # Examples
/// ```
/// use memory_game::core::{validate, Coord};
///
/// assert_eq!(validate("b3", 4, 4).unwrap(), Coord::new(1, 2));
/// assert_eq!(validate("1 2", 4, 4).unwrap(), Coord::new(1, 2));
/// assert!(validate("Z9", 4, 4).is_err());
/// ```
pub fn validate(text: &str, rows: usize, cols: usize) -> Result<Coord, CoordError> {
    let raw = parse(text)?;
    raw.resolve(rows, cols).ok_or(CoordError::OutOfRange {
        coord: raw,
        rows,
        cols,
    })
}

fn parse(text: &str) -> Result<RawCoord, CoordError> {
    let input = text.trim();
    let malformed = |reason| CoordError::Malformed {
        input: input.to_string(),
        reason,
    };

    let mut chars = input.chars();
    let first = chars.next().ok_or_else(|| malformed("empty input"))?;

    if first.is_ascii_alphabetic() {
        let digits = chars.as_str();
        if digits.is_empty() {
            return Err(malformed("missing column number"));
        }
        let col_one_based = parse_number(digits).ok_or_else(|| malformed("column must be a number"))?;
        let row = usize::from(first.to_ascii_uppercase() as u8 - b'A');
        return Ok(RawCoord::Labelled { row, col_one_based });
    }

    let parts: Vec<&str> = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [row, col] => {
            let row = parse_number(row).ok_or_else(|| malformed("row must be a number"))?;
            let col = parse_number(col).ok_or_else(|| malformed("column must be a number"))?;
            Ok(RawCoord::Numeric { row, col })
        }
        _ => Err(malformed("expected a label like B3 or two numbers like '1 2'")),
    }
}

/// Digits only; rejects signs, which `str::parse` would accept
fn parse_number(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
