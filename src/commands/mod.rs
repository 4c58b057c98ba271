//! Command implementations

pub mod scores;
pub mod simple;
pub mod simulate;

pub use scores::run_scores;
pub use simple::run_simple;
pub use simulate::{SimulateError, SimulationConfig, SimulationResult, run_simulation};
