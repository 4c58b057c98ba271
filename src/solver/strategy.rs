//! Pick selection strategies
//!
//! Defines the Strategy trait and concrete automated players.

use crate::core::{Coord, TileState};
use crate::game::GameSession;
use rand::Rng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashMap;
use std::str::FromStr;
use thiserror::Error;

/// A strategy for choosing which tile to turn over next
pub trait Strategy {
    /// Choose the next tile, or `None` if nothing can be picked
    fn next_pick<R: Rng + ?Sized>(&mut self, session: &GameSession, rng: &mut R) -> Option<Coord>;

    /// Learn the value of a tile that was just turned face up
    fn observe(&mut self, _coord: Coord, _value: &str) {}

    /// Forget everything before a new game
    fn reset(&mut self) {}
}

/// Enum wrapper for all strategy types
///
/// Allows runtime selection of strategy while maintaining static dispatch.
#[derive(Debug, Clone)]
pub enum StrategyType {
    /// Remembers every tile it has seen (default)
    Memory(MemoryStrategy),
    /// Turns over random hidden tiles with no memory
    Random(RandomStrategy),
}

impl Strategy for StrategyType {
    fn next_pick<R: Rng + ?Sized>(&mut self, session: &GameSession, rng: &mut R) -> Option<Coord> {
        match self {
            Self::Memory(s) => s.next_pick(session, rng),
            Self::Random(s) => s.next_pick(session, rng),
        }
    }

    fn observe(&mut self, coord: Coord, value: &str) {
        match self {
            Self::Memory(s) => s.observe(coord, value),
            Self::Random(s) => s.observe(coord, value),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Memory(s) => s.reset(),
            Self::Random(s) => s.reset(),
        }
    }
}

/// A strategy name that matches no known bot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy '{0}' (expected one of: {names})", names = StrategyType::NAMES.join(", "))]
pub struct UnknownStrategy(pub String);

impl StrategyType {
    /// Every name accepted by [`StrategyType::from_name`]
    pub const NAMES: [&'static str; 2] = ["memory", "random"];

    /// Create strategy from name string
    ///
    /// Supported names: "memory", "random" (case-insensitive).
    ///
    /// # Errors
    /// Returns [`UnknownStrategy`] for any other name.
    pub fn from_name(name: &str) -> Result<Self, UnknownStrategy> {
        match name.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory(MemoryStrategy::default())),
            "random" => Ok(Self::Random(RandomStrategy)),
            _ => Err(UnknownStrategy(name.to_string())),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Random(_) => "random",
        }
    }
}

impl FromStr for StrategyType {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

fn hidden_tiles(session: &GameSession) -> Vec<Coord> {
    session.board().coords_in(TileState::Hidden).collect()
}

/// Perfect-memory player
///
/// Completes any pair it already knows; otherwise explores an unseen tile and
/// pairs it immediately if its partner was seen before.
#[derive(Debug, Clone, Default)]
pub struct MemoryStrategy {
    seen: FxHashMap<String, Vec<Coord>>,
}

impl MemoryStrategy {
    fn is_hidden(session: &GameSession, coord: Coord) -> bool {
        session.board().state_at(coord) == Ok(TileState::Hidden)
    }

    fn is_seen(&self, coord: Coord) -> bool {
        self.seen.values().any(|coords| coords.contains(&coord))
    }

    /// A hidden pair whose both positions are known
    fn known_pair(&self, session: &GameSession) -> Option<Coord> {
        let mut pairs: Vec<Coord> = self
            .seen
            .values()
            .filter(|coords| coords.len() == 2)
            .filter(|coords| coords.iter().all(|&c| Self::is_hidden(session, c)))
            .map(|coords| coords[0])
            .collect();
        // Deterministic choice regardless of hash order
        pairs.sort_unstable();
        pairs.first().copied()
    }

    fn partner_of(&self, session: &GameSession, first: Coord) -> Option<Coord> {
        let value = session.board().value_at(first).ok()?;
        self.seen
            .get(value)?
            .iter()
            .copied()
            .find(|&c| c != first && Self::is_hidden(session, c))
    }

    fn explore<R: Rng + ?Sized>(&self, session: &GameSession, rng: &mut R) -> Option<Coord> {
        let hidden = hidden_tiles(session);
        let unseen: Vec<Coord> = hidden.iter().copied().filter(|&c| !self.is_seen(c)).collect();
        unseen.choose(rng).or_else(|| hidden.choose(rng)).copied()
    }
}

impl Strategy for MemoryStrategy {
    fn next_pick<R: Rng + ?Sized>(&mut self, session: &GameSession, rng: &mut R) -> Option<Coord> {
        match session.pending_first() {
            None => self
                .known_pair(session)
                .or_else(|| self.explore(session, rng)),
            Some(first) => self
                .partner_of(session, first)
                .or_else(|| self.explore(session, rng)),
        }
    }

    fn observe(&mut self, coord: Coord, value: &str) {
        let coords = self.seen.entry(value.to_string()).or_default();
        if !coords.contains(&coord) {
            coords.push(coord);
        }
    }

    fn reset(&mut self) {
        self.seen.clear();
    }
}

/// Memoryless player
///
/// Turns over a random hidden tile every time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn next_pick<R: Rng + ?Sized>(&mut self, session: &GameSession, rng: &mut R) -> Option<Coord> {
        hidden_tiles(session).choose(rng).copied()
    }
}
