//! Automated memory players
//!
//! Used to benchmark board sizes and to sanity-check the engine.

mod engine;
pub mod strategy;

pub use engine::{PlayError, Solver};
pub use strategy::{MemoryStrategy, RandomStrategy, Strategy, StrategyType, UnknownStrategy};
