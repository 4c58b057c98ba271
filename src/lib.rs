//! Memory Game
//!
//! A concentration matching game: find every pair of words on a face-down
//! grid in as few attempts as possible.
//!
//! # Quick Start
//!
//! ```rust
//! use memory_game::core::{BoardSize, Coord};
//! use memory_game::game::{GameSession, SelectOutcome};
//! use memory_game::highscores::{HighscoreEntry, HighscoreLedger, KeyStyle};
//! use memory_game::wordlists::WordPool;
//!
//! let size = BoardSize::new(2, 2).unwrap();
//! let mut session = GameSession::start(&WordPool::embedded(), size, &mut rand::rng()).unwrap();
//!
//! // First pick only turns a tile over
//! let outcome = session.select_text("A1").unwrap();
//! assert_eq!(outcome, SelectOutcome::FirstRevealed { coord: Coord::new(0, 0) });
//! assert_eq!(session.attempts(), 0);
//!
//! let mut ledger = HighscoreLedger::new(5, KeyStyle::Dimensions).unwrap();
//! ledger.record(HighscoreEntry::new("Ada", 3, size).unwrap());
//! assert_eq!(ledger.top_for(size, 5).len(), 1);
//! ```

// Core domain types
pub mod core;

// Game rules and session state
pub mod game;

// Word lists
pub mod wordlists;

// Ranked highscores
pub mod highscores;

// Automated players
pub mod solver;

// Runtime settings
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
