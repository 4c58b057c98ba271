//! Highscore ranking and persistence

mod entry;
mod ledger;

pub use entry::{HighscoreEntry, KeyStyle, SizeKey};
pub use ledger::{DEFAULT_CAP, EXTENDED_CAP, HighscoreLedger, LedgerError};
