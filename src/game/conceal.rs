//! When to flip mismatched tiles back over
//!
//! The engine leaves a mismatched pair face up. Front ends decide when to hide
//! it again: the terminal shell does so as soon as the player has seen the
//! board, the TUI after a fixed delay. Both drive the session through the same
//! [`ConcealScheduler`] calls.

use super::GameSession;
use crate::core::Coord;
use std::time::{Duration, Instant};

/// Schedules the conceal of a mismatched pair
pub trait ConcealScheduler {
    /// Record a mismatch observed at `now`
    fn on_mismatch(&mut self, pair: [Coord; 2], now: Instant);

    /// Conceal the pending pair if it is due, returning it
    fn poll(&mut self, session: &mut GameSession, now: Instant) -> Option<[Coord; 2]>;

    /// When the pending pair becomes due, if any
    fn deadline(&self) -> Option<Instant>;

    /// Whether a pair is still waiting to be concealed
    fn is_pending(&self) -> bool {
        self.deadline().is_some()
    }
}

/// Conceals on the first poll after the mismatch
#[derive(Debug, Default)]
pub struct Immediate {
    pending: Option<(Instant, [Coord; 2])>,
}

impl ConcealScheduler for Immediate {
    fn on_mismatch(&mut self, pair: [Coord; 2], now: Instant) {
        self.pending = Some((now, pair));
    }

    fn poll(&mut self, session: &mut GameSession, _now: Instant) -> Option<[Coord; 2]> {
        self.pending.take()?;
        session.conceal_mismatch()
    }

    fn deadline(&self) -> Option<Instant> {
        self.pending.map(|(at, _)| at)
    }
}

/// Conceals once `delay` has elapsed since the mismatch
#[derive(Debug)]
pub struct Deferred {
    delay: Duration,
    due_at: Option<Instant>,
}

impl Deferred {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, due_at: None }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl ConcealScheduler for Deferred {
    fn on_mismatch(&mut self, _pair: [Coord; 2], now: Instant) {
        self.due_at = Some(now + self.delay);
    }

    fn poll(&mut self, session: &mut GameSession, now: Instant) -> Option<[Coord; 2]> {
        let due_at = self.due_at?;
        if now < due_at {
            return None;
        }
        self.due_at = None;
        session.conceal_mismatch()
    }

    fn deadline(&self) -> Option<Instant> {
        self.due_at
    }
}
