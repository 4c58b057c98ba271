//! Simple interactive CLI mode
//!
//! Text-based game loop without the TUI. Mismatched tiles are shown once and
//! flipped back before the next prompt.

use crate::config::GameConfig;
use crate::core::Coord;
use crate::game::{ConcealScheduler, GameSession, Immediate, SelectOutcome};
use crate::highscores::{HighscoreEntry, HighscoreLedger};
use crate::output::{print_board, print_highscores, print_win_banner};
use anyhow::{Context, Result};
use colored::Colorize;
use log::warn;
use std::io::{self, Write};
use std::time::Instant;

/// A line typed at the pick prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Quit,
    NewGame,
    Help,
    Scores,
    Pick(String),
}

impl ShellCommand {
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        match trimmed.to_lowercase().as_str() {
            "quit" | "q" | "exit" => Self::Quit,
            "new" | "n" => Self::NewGame,
            "help" | "h" | "?" => Self::Help,
            "scores" | "s" => Self::Scores,
            _ => Self::Pick(trimmed.to_string()),
        }
    }
}

fn print_help() {
    println!("Pick a tile by its label, e.g. {} (row letter, column number),", "B3".bright_white());
    println!("or by zero-based row and column, e.g. {}.", "1 2".bright_white());
    println!("Commands: 'new' for a new game, 'scores' for the ranking, 'quit' to exit\n");
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if the word list or highscore file cannot be loaded, or
/// if reading from the terminal fails.
pub fn run_simple(config: &GameConfig) -> Result<()> {
    let pool = config.pool().context("cannot load word list")?;
    let mut ledger = config.ledger().context("cannot load highscores")?;
    let mut rng = config.rng();

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                  Memory Game - Text Mode                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    println!("Find every pair of matching words in as few attempts as you can.");
    print_help();

    'games: loop {
        let mut session = GameSession::start(&pool, config.size, &mut rng)?;
        let mut scheduler = Immediate::default();
        println!("🔄 New {} game: {} pairs to find", config.size, session.total_pairs());

        loop {
            print_board(&session);
            scheduler.poll(&mut session, Instant::now());

            let Some(input) = get_user_input("Pick a tile")? else {
                return Ok(());
            };

            let pick = match ShellCommand::parse(&input) {
                ShellCommand::Quit => {
                    println!("\n👋 Thanks for playing!\n");
                    return Ok(());
                }
                ShellCommand::NewGame => continue 'games,
                ShellCommand::Help => {
                    print_help();
                    continue;
                }
                ShellCommand::Scores => {
                    print_highscores(&ledger, config.size, None);
                    continue;
                }
                ShellCommand::Pick(text) => text,
            };

            match session.select_text(&pick) {
                Ok(SelectOutcome::FirstRevealed { coord }) => {
                    println!("{coord} is {}", tile_value(&session, coord).bright_white().bold());
                }
                Ok(SelectOutcome::Matched { pair }) => {
                    println!("{} {} and {} match!", "✓".green(), pair[0], pair[1]);
                }
                Ok(SelectOutcome::Mismatched { pair }) => {
                    println!(
                        "{} {} is {}, no match. Remember them!",
                        "✗".red(),
                        pair[1],
                        tile_value(&session, pair[1]).bright_white().bold()
                    );
                    scheduler.on_mismatch(pair, Instant::now());
                }
                Ok(SelectOutcome::Won { attempts, .. }) => {
                    print_board(&session);
                    print_win_banner(attempts, config.size);
                    record_score(config, &mut ledger, attempts)?;

                    match get_user_input("Play again? (yes/no)")?
                        .unwrap_or_default()
                        .to_lowercase()
                        .as_str()
                    {
                        "yes" | "y" => continue 'games,
                        _ => {
                            println!("\n👋 Thanks for playing!\n");
                            return Ok(());
                        }
                    }
                }
                Err(e) => println!("{} {e}\n", "❌".red()),
            }
        }
    }
}

fn tile_value(session: &GameSession, coord: Coord) -> String {
    session
        .board()
        .value_at(coord)
        .map(str::to_string)
        .unwrap_or_default()
}

/// Ask for a name, record the score and rewrite the highscore file
fn record_score(config: &GameConfig, ledger: &mut HighscoreLedger, attempts: u32) -> Result<()> {
    let entry = loop {
        let prompt = format!("Your name [{}]", config.player);
        let typed = get_user_input(&prompt)?.unwrap_or_default();
        let name = if typed.is_empty() { config.player.as_str() } else { typed.as_str() };

        match HighscoreEntry::new(name, attempts, config.size) {
            Ok(entry) => break entry,
            Err(e) => println!("{} {e}", "❌".red()),
        }
    };

    let rank = ledger.record(entry);
    match rank {
        Some(rank) => println!("\n  New highscore, rank {}!", rank.to_string().bright_green().bold()),
        None => println!("\n  Not in the top {} this time.", ledger.cap()),
    }
    if let Err(e) = ledger.persist(&config.scores_path) {
        warn!("{e}");
        println!("{} could not save highscores: {e}", "⚠".yellow());
    }
    print_highscores(ledger, config.size, rank);
    println!();
    Ok(())
}

/// Get user input with a prompt, `None` at end of input
fn get_user_input(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }

    Ok(Some(input.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!(ShellCommand::parse("quit"), ShellCommand::Quit);
        assert_eq!(ShellCommand::parse(" Q "), ShellCommand::Quit);
        assert_eq!(ShellCommand::parse("new"), ShellCommand::NewGame);
        assert_eq!(ShellCommand::parse("?"), ShellCommand::Help);
        assert_eq!(ShellCommand::parse("scores"), ShellCommand::Scores);
    }

    #[test]
    fn coordinates_pass_through_untouched() {
        assert_eq!(ShellCommand::parse(" b3 "), ShellCommand::Pick("b3".to_string()));
        assert_eq!(ShellCommand::parse("1 2"), ShellCommand::Pick("1 2".to_string()));
    }
}
