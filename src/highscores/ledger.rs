//! Ranked highscore ledger
//!
//! Entries are bucketed by size key, kept ascending by attempts (ties in
//! insertion order) and truncated to a fixed cap. The store is a flat text
//! file with one `name,attempts,RxC` line per entry, rewritten in full on
//! every save.

use super::{HighscoreEntry, KeyStyle, SizeKey};
use crate::core::BoardSize;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default number of entries kept per bucket
pub const DEFAULT_CAP: usize = 5;

/// Larger cap for long-running tables
pub const EXTENDED_CAP: usize = 10;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("cannot read highscores from {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write highscores to {}: {source}", path.display())]
    PersistFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("highscore I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("skipped corrupt highscore line {line}: {reason}")]
    CorruptLedger { line: usize, reason: String },

    #[error("invalid player name '{0}': must be non-empty and contain no commas")]
    InvalidName(String),

    #[error("the highscore cap must be at least 1")]
    InvalidCap,
}

/// Top-N attempt counts per board size
#[derive(Debug)]
pub struct HighscoreLedger {
    cap: usize,
    style: KeyStyle,
    buckets: BTreeMap<SizeKey, Vec<HighscoreEntry>>,
    corrupt_lines: Vec<LedgerError>,
}

impl HighscoreLedger {
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidCap`] for a cap of zero.
    pub fn new(cap: usize, style: KeyStyle) -> Result<Self, LedgerError> {
        if cap == 0 {
            return Err(LedgerError::InvalidCap);
        }
        Ok(Self {
            cap,
            style,
            buckets: BTreeMap::new(),
            corrupt_lines: Vec::new(),
        })
    }

    #[inline]
    #[must_use]
    pub const fn cap(&self) -> usize {
        self.cap
    }

    #[inline]
    #[must_use]
    pub const fn style(&self) -> KeyStyle {
        self.style
    }

    #[must_use]
    pub const fn key_for(&self, size: BoardSize) -> SizeKey {
        self.style.key(size)
    }

    /// Add a finished game, re-rank its bucket and truncate to the cap
    ///
    /// Returns the entry's 1-based rank if it made the table.
    ///
    /// # Examples
    /// ```
    /// use memory_game::core::BoardSize;
    /// use memory_game::highscores::{HighscoreEntry, HighscoreLedger, KeyStyle};
    ///
    /// let size = BoardSize::new(4, 4).unwrap();
    /// let mut ledger = HighscoreLedger::new(5, KeyStyle::Dimensions).unwrap();
    ///
    /// ledger.record(HighscoreEntry::new("Ada", 14, size).unwrap());
    /// let rank = ledger.record(HighscoreEntry::new("Bo", 11, size).unwrap());
    ///
    /// assert_eq!(rank, Some(1));
    /// assert_eq!(ledger.top_for(size, 5)[1].name(), "Ada");
    /// ```
    pub fn record(&mut self, entry: HighscoreEntry) -> Option<usize> {
        let key = self.style.key(entry.size());
        let attempts = entry.attempts();
        let bucket = self.buckets.entry(key).or_default();

        bucket.push(entry);
        bucket.sort_by_key(HighscoreEntry::attempts);
        // Stable sort leaves the new entry after every equal score
        let rank = bucket.iter().filter(|e| e.attempts() <= attempts).count();
        bucket.truncate(self.cap);

        debug!("recorded {attempts} attempts in bucket {key}, rank {rank}");
        (rank <= self.cap).then_some(rank)
    }

    /// Best `n` entries for a key, or nothing if the key is unknown
    #[must_use]
    pub fn top_n(&self, key: &SizeKey, n: usize) -> &[HighscoreEntry] {
        self.buckets
            .get(key)
            .map_or(&[][..], |bucket| &bucket[..n.min(bucket.len())])
    }

    /// [`HighscoreLedger::top_n`] for the bucket a board size falls into
    #[must_use]
    pub fn top_for(&self, size: BoardSize, n: usize) -> &[HighscoreEntry] {
        self.top_n(&self.key_for(size), n)
    }

    /// Buckets in key order
    pub fn buckets(&self) -> impl Iterator<Item = (&SizeKey, &[HighscoreEntry])> {
        self.buckets.iter().map(|(key, bucket)| (key, bucket.as_slice()))
    }

    /// Total entries across all buckets
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(Vec::is_empty)
    }

    /// Lines skipped by the last load
    #[must_use]
    pub fn corrupt_lines(&self) -> &[LedgerError] {
        &self.corrupt_lines
    }

    /// Read a ledger, re-ranking every entry as it is recorded
    ///
    /// Malformed lines are skipped with a warning and kept in
    /// [`HighscoreLedger::corrupt_lines`]; they never abort the load.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidCap`] for a zero cap and
    /// [`LedgerError::Io`] if the reader fails.
    pub fn read_from<R: BufRead>(reader: R, cap: usize, style: KeyStyle) -> Result<Self, LedgerError> {
        let mut ledger = Self::new(cap, style)?;

        for (index, raw) in reader.split(b'\n').enumerate() {
            let raw = raw?;
            let parsed = String::from_utf8(raw)
                .map_err(|_| "line is not valid UTF-8".to_string())
                .and_then(|line| {
                    let line = line.trim_end_matches('\r');
                    if line.trim().is_empty() {
                        Ok(None)
                    } else {
                        HighscoreEntry::parse_line(line).map(Some)
                    }
                });

            match parsed {
                Ok(None) => {}
                Ok(Some(entry)) => {
                    ledger.record(entry);
                }
                Err(reason) => {
                    let error = LedgerError::CorruptLedger {
                        line: index + 1,
                        reason,
                    };
                    warn!("{error}");
                    ledger.corrupt_lines.push(error);
                }
            }
        }

        Ok(ledger)
    }

    /// Write every entry, bucket by bucket, best first
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Io`] if the writer fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), LedgerError> {
        for (_, bucket) in self.buckets() {
            for entry in bucket {
                writeln!(writer, "{}", entry.to_line())?;
            }
        }
        writer.flush()?;
        Ok(())
    }

    /// Load a ledger file
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::SourceUnavailable`] if the file cannot be
    /// opened or read.
    pub fn load<P: AsRef<Path>>(path: P, cap: usize, style: KeyStyle) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        let unavailable = |source| LedgerError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let file = fs::File::open(path).map_err(unavailable)?;
        match Self::read_from(BufReader::new(file), cap, style) {
            Err(LedgerError::Io(source)) => Err(unavailable(source)),
            other => other,
        }
    }

    /// Load a ledger file, treating a missing file as an empty ledger
    ///
    /// # Errors
    ///
    /// As [`HighscoreLedger::load`], except for a file that does not exist.
    pub fn load_or_default<P: AsRef<Path>>(
        path: P,
        cap: usize,
        style: KeyStyle,
    ) -> Result<Self, LedgerError> {
        match Self::load(&path, cap, style) {
            Err(LedgerError::SourceUnavailable { source, .. })
                if source.kind() == io::ErrorKind::NotFound =>
            {
                debug!("no highscores at {}, starting empty", path.as_ref().display());
                Self::new(cap, style)
            }
            other => other,
        }
    }

    /// Rewrite the ledger file in full
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PersistFailed`] if the file cannot be written.
    pub fn persist<P: AsRef<Path>>(&self, path: P) -> Result<(), LedgerError> {
        let path = path.as_ref();
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        fs::write(path, buffer).map_err(|source| LedgerError::PersistFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn size(rows: usize, cols: usize) -> BoardSize {
        BoardSize::new(rows, cols).unwrap()
    }

    fn entry(name: &str, attempts: u32, rows: usize, cols: usize) -> HighscoreEntry {
        HighscoreEntry::new(name, attempts, size(rows, cols)).unwrap()
    }

    fn names(entries: &[HighscoreEntry]) -> Vec<&str> {
        entries.iter().map(HighscoreEntry::name).collect()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("memory_game_ledger_{}_{name}", std::process::id()))
    }

    #[test]
    fn zero_cap_is_rejected() {
        assert!(matches!(
            HighscoreLedger::new(0, KeyStyle::Dimensions),
            Err(LedgerError::InvalidCap)
        ));
    }

    #[test]
    fn cap_keeps_the_smallest_attempts() {
        let mut ledger = HighscoreLedger::new(DEFAULT_CAP, KeyStyle::Dimensions).unwrap();
        for (name, attempts) in [("a", 20), ("b", 12), ("c", 15), ("d", 30), ("e", 9), ("f", 11)] {
            ledger.record(entry(name, attempts, 4, 4));
        }

        let top = ledger.top_for(size(4, 4), 10);
        assert_eq!(names(top), vec!["e", "f", "b", "c", "a"]);
        assert_eq!(ledger.len(), 5);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut ledger = HighscoreLedger::new(DEFAULT_CAP, KeyStyle::Dimensions).unwrap();
        for name in ["first", "second", "third"] {
            ledger.record(entry(name, 10, 2, 2));
        }
        ledger.record(entry("better", 8, 2, 2));

        assert_eq!(
            names(ledger.top_for(size(2, 2), 5)),
            vec!["better", "first", "second", "third"]
        );
    }

    #[test]
    fn record_reports_rank() {
        let mut ledger = HighscoreLedger::new(2, KeyStyle::Dimensions).unwrap();
        assert_eq!(ledger.record(entry("a", 10, 2, 2)), Some(1));
        assert_eq!(ledger.record(entry("b", 10, 2, 2)), Some(2));
        assert_eq!(ledger.record(entry("c", 10, 2, 2)), None);
        assert_eq!(ledger.record(entry("d", 5, 2, 2)), Some(1));
        assert_eq!(names(ledger.top_for(size(2, 2), 5)), vec!["d", "a"]);
    }

    #[test]
    fn buckets_are_separate_per_key() {
        let mut ledger = HighscoreLedger::new(DEFAULT_CAP, KeyStyle::Dimensions).unwrap();
        ledger.record(entry("wide", 5, 3, 4));
        ledger.record(entry("tall", 6, 4, 3));

        assert_eq!(names(ledger.top_for(size(3, 4), 5)), vec!["wide"]);
        assert_eq!(names(ledger.top_for(size(4, 3), 5)), vec!["tall"]);
        assert!(ledger.top_for(size(2, 2), 5).is_empty());
    }

    #[test]
    fn area_style_merges_transposed_boards() {
        let mut ledger = HighscoreLedger::new(DEFAULT_CAP, KeyStyle::Area).unwrap();
        ledger.record(entry("wide", 7, 3, 4));
        ledger.record(entry("tall", 6, 4, 3));

        assert_eq!(names(ledger.top_n(&SizeKey::Area(12), 5)), vec!["tall", "wide"]);
    }

    #[test]
    fn top_n_limits_results() {
        let mut ledger = HighscoreLedger::new(EXTENDED_CAP, KeyStyle::Dimensions).unwrap();
        for attempts in 1..=8 {
            ledger.record(entry("p", attempts, 2, 2));
        }
        assert_eq!(ledger.top_for(size(2, 2), 3).len(), 3);
        assert_eq!(ledger.top_for(size(2, 2), 100).len(), 8);
        assert!(ledger.top_n(&SizeKey::Area(4), 3).is_empty());
    }

    #[test]
    fn stream_round_trip() {
        let mut ledger = HighscoreLedger::new(DEFAULT_CAP, KeyStyle::Dimensions).unwrap();
        ledger.record(entry("Ada", 12, 4, 4));
        ledger.record(entry("Bo", 9, 4, 4));
        ledger.record(entry("Cy", 4, 2, 3));

        let mut buffer = Vec::new();
        ledger.write_to(&mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer.clone()).unwrap(),
            "Cy,4,2x3\nBo,9,4x4\nAda,12,4x4\n"
        );

        let reloaded =
            HighscoreLedger::read_from(Cursor::new(buffer), DEFAULT_CAP, KeyStyle::Dimensions)
                .unwrap();
        let original: Vec<_> = ledger.buckets().collect();
        let restored: Vec<_> = reloaded.buckets().collect();
        assert_eq!(original, restored);
        assert!(reloaded.corrupt_lines().is_empty());
    }

    #[test]
    fn corrupt_lines_are_skipped() {
        let text = "Ada,12,4x4\ngarbage\n\nBo,x,4x4\nCy,3,4x4\nDi,5,3x3\n";
        let ledger =
            HighscoreLedger::read_from(Cursor::new(text), DEFAULT_CAP, KeyStyle::Dimensions)
                .unwrap();

        assert_eq!(names(ledger.top_for(size(4, 4), 5)), vec!["Cy", "Ada"]);
        let skipped: Vec<usize> = ledger
            .corrupt_lines()
            .iter()
            .filter_map(|e| match e {
                LedgerError::CorruptLedger { line, .. } => Some(*line),
                _ => None,
            })
            .collect();
        assert_eq!(skipped, vec![2, 4, 6]);
    }

    #[test]
    fn undecodable_lines_are_skipped() {
        let bytes: &[u8] = b"Ada,12,4x4\n\xff\xfe,3,4x4\r\nBo,9,4x4\r\n";
        let ledger = HighscoreLedger::read_from(bytes, DEFAULT_CAP, KeyStyle::Dimensions).unwrap();

        assert_eq!(names(ledger.top_for(size(4, 4), 5)), vec!["Bo", "Ada"]);
        assert_eq!(ledger.corrupt_lines().len(), 1);
        assert!(matches!(
            &ledger.corrupt_lines()[0],
            LedgerError::CorruptLedger { line: 2, reason } if reason.contains("UTF-8")
        ));
    }

    #[test]
    fn load_applies_cap_and_ranking() {
        let text = "a,9,2x2\nb,8,2x2\nc,7,2x2\nd,6,2x2\n";
        let ledger = HighscoreLedger::read_from(Cursor::new(text), 2, KeyStyle::Dimensions).unwrap();
        assert_eq!(names(ledger.top_for(size(2, 2), 5)), vec!["d", "c"]);
    }

    #[test]
    fn file_round_trip() {
        let path = temp_path("scores.txt");
        let mut ledger = HighscoreLedger::new(DEFAULT_CAP, KeyStyle::Dimensions).unwrap();
        ledger.record(entry("Ada", 12, 4, 4));
        ledger.persist(&path).unwrap();

        ledger.record(entry("Bo", 3, 4, 4));
        ledger.persist(&path).unwrap();

        let reloaded = HighscoreLedger::load(&path, DEFAULT_CAP, KeyStyle::Dimensions).unwrap();
        assert_eq!(names(reloaded.top_for(size(4, 4), 5)), vec!["Bo", "Ada"]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file() {
        let path = temp_path("missing.txt");
        assert!(matches!(
            HighscoreLedger::load(&path, DEFAULT_CAP, KeyStyle::Dimensions),
            Err(LedgerError::SourceUnavailable { .. })
        ));

        let ledger =
            HighscoreLedger::load_or_default(&path, DEFAULT_CAP, KeyStyle::Dimensions).unwrap();
        assert!(ledger.is_empty());
    }
}
