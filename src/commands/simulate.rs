//! Simulate command
//!
//! Plays many seeded bot games in parallel and summarises the attempt counts.

use crate::core::BoardSize;
use crate::game::{GameSession, StartError};
use crate::solver::{PlayError, Solver, StrategyType};
use crate::wordlists::WordPool;
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulateError {
    #[error("nothing to simulate: game count is zero")]
    NoGames,

    #[error(transparent)]
    Start(#[from] StartError),

    #[error(transparent)]
    Play(#[from] PlayError),
}

/// How a batch of simulated games is run
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub size: BoardSize,
    pub strategy: StrategyType,
    pub games: usize,
    /// Game `i` is seeded with `base_seed + i`
    pub base_seed: u64,
    pub show_progress: bool,
}

/// Result of a simulation run
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub size: BoardSize,
    pub strategy: &'static str,
    pub games: usize,
    pub total_attempts: u64,
    pub average_attempts: f64,
    pub min_attempts: u32,
    pub max_attempts: u32,
    pub distribution: BTreeMap<u32, usize>,
    pub duration: Duration,
    pub games_per_second: f64,
}

fn play_one(
    pool: &WordPool,
    config: &SimulationConfig,
    index: usize,
) -> Result<u32, SimulateError> {
    let seed = config.base_seed.wrapping_add(index as u64);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut session = GameSession::start(pool, config.size, &mut rng)?;
    let attempts = Solver::new(config.strategy.clone()).play(&mut session, &mut rng)?;
    debug!("game {index} (seed {seed}) won in {attempts} attempts");
    Ok(attempts)
}

/// Run `config.games` independent games across the rayon pool
///
/// Results depend only on the seeds, not on scheduling.
///
/// # Errors
///
/// Returns [`SimulateError::NoGames`] for an empty run, or the first setup or
/// play failure.
///
/// # Panics
///
/// Panics if the progress bar template is invalid (it is a constant).
pub fn run_simulation(
    pool: &WordPool,
    config: &SimulationConfig,
) -> Result<SimulationResult, SimulateError> {
    if config.games == 0 {
        return Err(SimulateError::NoGames);
    }

    let pb = if config.show_progress {
        let pb = ProgressBar::new(config.games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
                .unwrap()
                .progress_chars("█▓▒░"),
        );
        pb.set_message(format!("{} on {}", config.strategy.name(), config.size));
        pb
    } else {
        ProgressBar::hidden()
    };

    let start = Instant::now();
    let attempts: Vec<u32> = (0..config.games)
        .into_par_iter()
        .map(|index| {
            let result = play_one(pool, config, index);
            pb.inc(1);
            result
        })
        .collect::<Result<_, _>>()?;
    let duration = start.elapsed();
    pb.finish_with_message("Complete!");

    let mut distribution = BTreeMap::new();
    for &count in &attempts {
        *distribution.entry(count).or_insert(0) += 1;
    }
    let total_attempts: u64 = attempts.iter().map(|&a| u64::from(a)).sum();

    Ok(SimulationResult {
        size: config.size,
        strategy: config.strategy.name(),
        games: config.games,
        total_attempts,
        average_attempts: total_attempts as f64 / config.games as f64,
        min_attempts: attempts.iter().copied().min().unwrap_or(0),
        max_attempts: attempts.iter().copied().max().unwrap_or(0),
        distribution,
        duration,
        games_per_second: config.games as f64 / duration.as_secs_f64().max(f64::EPSILON),
    })
}
