//! Scores command
//!
//! Prints the stored highscore rankings.

use crate::config::GameConfig;
use crate::output::print_ledger;
use anyhow::{Context, Result};

/// Print every ranking in the configured highscore file
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read.
pub fn run_scores(config: &GameConfig) -> Result<()> {
    let ledger = config
        .ledger()
        .with_context(|| format!("cannot read {}", config.scores_path.display()))?;
    print_ledger(&ledger);
    Ok(())
}
