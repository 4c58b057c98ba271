//! Highscore entries and size keys

use super::LedgerError;
use crate::core::BoardSize;
use std::fmt;
use std::str::FromStr;

/// How board sizes are grouped into ranking buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyStyle {
    /// One bucket per `RxC`; 3x4 and 4x3 rank separately
    #[default]
    Dimensions,
    /// One bucket per tile count; 3x4 and 4x3 share a ranking
    Area,
}

impl KeyStyle {
    #[must_use]
    pub const fn key(self, size: BoardSize) -> SizeKey {
        match self {
            Self::Dimensions => SizeKey::Dimensions(size),
            Self::Area => SizeKey::Area(size.tiles()),
        }
    }
}

impl FromStr for KeyStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dims" | "dimensions" => Ok(Self::Dimensions),
            "area" | "tiles" => Ok(Self::Area),
            other => Err(format!("unknown key style '{other}' (expected 'dims' or 'area')")),
        }
    }
}

/// Bucket key of a highscore ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizeKey {
    Dimensions(BoardSize),
    Area(usize),
}

impl fmt::Display for SizeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimensions(size) => write!(f, "{size}"),
            Self::Area(tiles) => write!(f, "{tiles} tiles"),
        }
    }
}

/// One finished game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighscoreEntry {
    name: String,
    attempts: u32,
    size: BoardSize,
}

impl HighscoreEntry {
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidName`] for names that are empty or would
    /// break the line format (commas, line breaks).
    pub fn new(name: &str, attempts: u32, size: BoardSize) -> Result<Self, LedgerError> {
        let name = name.trim();
        if name.is_empty() || name.contains([',', '\n', '\r']) {
            return Err(LedgerError::InvalidName(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            attempts,
            size,
        })
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> BoardSize {
        self.size
    }

    /// Stored form: `name,attempts,RxC`
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{},{},{}", self.name, self.attempts, self.size)
    }

    /// Parse a stored line; the size may also be a bare `N` meaning N×N
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found.
    pub fn parse_line(line: &str) -> Result<Self, String> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let [name, attempts, size] = fields.as_slice() else {
            return Err(format!("expected 3 fields, found {}", fields.len()));
        };

        let attempts = attempts
            .parse::<u32>()
            .map_err(|_| format!("attempts '{attempts}' is not a non-negative integer"))?;
        let size = size.parse::<BoardSize>().map_err(|e| e.to_string())?;

        Self::new(name, attempts, size).map_err(|e| e.to_string())
    }
}
