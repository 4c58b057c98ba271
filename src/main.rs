//! Memory Game - CLI
//!
//! Concentration matching game with TUI and text modes, highscores and bot
//! simulations.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use memory_game::{
    commands::{SimulationConfig, run_scores, run_simple, run_simulation},
    config::{DEFAULT_PLAYER, DEFAULT_SCORES_PATH, GameConfig, WordSource},
    core::BoardSize,
    highscores::{DEFAULT_CAP, HighscoreEntry, KeyStyle},
    interactive::{App, run_tui},
    output::print_simulation_result,
    solver::StrategyType,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "memory_game",
    about = "Memory matching game: find every pair in as few attempts as possible",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Word list: 'embedded' (default) or path to a file with one word per line
    #[arg(short = 'w', long, global = true, default_value = "embedded")]
    words: WordSource,

    /// Highscore file
    #[arg(long, global = true, default_value = DEFAULT_SCORES_PATH)]
    scores: PathBuf,

    /// Board size as RxC (e.g. 4x4, 3x4) or N for NxN
    #[arg(short = 's', long, global = true, default_value = "4x4")]
    size: BoardSize,

    /// Player name for the highscores
    #[arg(long, global = true, default_value = DEFAULT_PLAYER)]
    name: String,

    /// Seed for reproducible boards
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Entries kept per highscore ranking (5 or 10)
    #[arg(long, global = true, default_value_t = DEFAULT_CAP)]
    cap: usize,

    /// Highscore grouping: 'dims' (per RxC) or 'area' (per tile count)
    #[arg(long, global = true, default_value = "dims")]
    key: KeyStyle,

    /// How long a mismatched pair stays visible in the TUI, in milliseconds
    #[arg(long, global = true, default_value_t = 1000)]
    delay_ms: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (text prompts, no TUI)
    Simple,

    /// Show the highscore rankings
    Scores,

    /// Let a bot play many games and report attempt statistics
    Simulate {
        /// Number of games to play
        #[arg(short = 'n', long, default_value = "100")]
        count: usize,

        /// Bot strategy: memory (default) or random
        #[arg(long, default_value = "memory")]
        strategy: StrategyType,
    },
}

impl Cli {
    fn config(&self) -> Result<GameConfig> {
        if self.cap == 0 {
            bail!("--cap must be at least 1");
        }
        // Reject names the highscore file could not store before anyone plays
        HighscoreEntry::new(&self.name, 0, self.size).context("invalid --name")?;

        Ok(GameConfig {
            words: self.words.clone(),
            scores_path: self.scores.clone(),
            size: self.size,
            player: self.name.trim().to_string(),
            cap: self.cap,
            key_style: self.key,
            conceal_delay: Duration::from_millis(self.delay_ms),
            seed: self.seed,
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.config()?;

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            let app = App::new(config)?;
            run_tui(app)?;
        }
        Commands::Simple => run_simple(&config)?,
        Commands::Scores => run_scores(&config)?,
        Commands::Simulate { count, strategy } => {
            let pool = config.pool().context("cannot load word list")?;
            let sim = SimulationConfig {
                size: config.size,
                strategy,
                games: count,
                base_seed: config.seed.unwrap_or_else(rand::random),
                show_progress: true,
            };
            println!("🎯 Simulating {count} games on a {} board...", config.size);
            let result = run_simulation(&pool, &sim)?;
            print_simulation_result(&result);
        }
    }

    Ok(())
}
