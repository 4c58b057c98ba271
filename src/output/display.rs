//! Display functions for boards, highscores and command results

use super::formatters::{board_lines, pairs_bar};
use crate::commands::SimulationResult;
use crate::core::BoardSize;
use crate::game::GameSession;
use crate::highscores::{HighscoreEntry, HighscoreLedger};
use colored::Colorize;

/// Print the board with row letters and column numbers
pub fn print_board(session: &GameSession) {
    let mut lines = board_lines(session.board()).into_iter();
    if let Some(header) = lines.next() {
        println!("\n{}", header.bright_black());
    }
    for line in lines {
        println!("{line}");
    }
    println!(
        "\n   Pairs: [{}] {}/{}   Attempts: {}",
        pairs_bar(session.matched_pairs(), session.total_pairs(), 20).green(),
        session.matched_pairs(),
        session.total_pairs(),
        session.attempts().to_string().bright_yellow()
    );
}

/// Celebration banner for a finished game
pub fn print_win_banner(attempts: u32, size: BoardSize) {
    println!("\n{}", "═".repeat(60).bright_cyan());
    println!(
        "{}",
        "      🎉 ✨  A L L   P A I R S   F O U N D !  ✨ 🎉      "
            .bright_green()
            .bold()
    );
    println!("{}", "═".repeat(60).bright_cyan());

    let pairs = size.pairs();
    let verdict = match attempts.saturating_sub(u32::try_from(pairs).unwrap_or(u32::MAX)) {
        0 => "🏆 Perfect memory!",
        1..=2 => "⭐ Excellent!",
        3..=6 => "💫 Well played!",
        _ => "👍 Done!",
    };
    println!("\n  {}", verdict.bright_yellow().bold());
    println!(
        "  {} board cleared in {} {}",
        size.to_string().bright_white(),
        attempts.to_string().bright_cyan().bold(),
        if attempts == 1 { "attempt" } else { "attempts" }
    );
}

fn print_entries(entries: &[HighscoreEntry], highlight: Option<usize>) {
    if entries.is_empty() {
        println!("   {}", "no scores yet".bright_black());
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        let rank = i + 1;
        let line = format!(
            "   {rank:>2}. {:<16} {:>4} attempts  ({})",
            entry.name(),
            entry.attempts(),
            entry.size()
        );
        if highlight == Some(rank) {
            println!("{}", line.bright_green().bold());
        } else {
            println!("{line}");
        }
    }
}

/// Print the ranking a board size falls into, highlighting `rank` if given
pub fn print_highscores(ledger: &HighscoreLedger, size: BoardSize, highlight: Option<usize>) {
    let key = ledger.key_for(size);
    println!("\n🏅 {} {}", "Highscores".bright_cyan().bold(), key.to_string().bright_white());
    print_entries(ledger.top_n(&key, ledger.cap()), highlight);
}

/// Print every ranking in the ledger
pub fn print_ledger(ledger: &HighscoreLedger) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "HIGHSCORES".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    if ledger.is_empty() {
        println!("\n   {}", "No games recorded yet.".bright_black());
    }
    for (key, bucket) in ledger.buckets() {
        println!("\n📋 {}", key.to_string().bright_white().bold());
        print_entries(bucket, None);
    }

    let skipped = ledger.corrupt_lines().len();
    if skipped > 0 {
        println!(
            "\n{}",
            format!("⚠ {skipped} unreadable line(s) were skipped").yellow()
        );
    }
}

/// Print the result of a simulation run
pub fn print_simulation_result(result: &SimulationResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Board:            {}", result.size);
    println!("   Strategy:         {}", result.strategy);
    println!("   Games played:     {}", result.games);
    println!(
        "   Average attempts: {}",
        format!("{:.2}", result.average_attempts).bright_yellow().bold()
    );
    println!("   Best case:        {}", result.min_attempts.to_string().green());
    println!("   Worst case:       {}", result.max_attempts.to_string().yellow());
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for (&attempts, &count) in &result.distribution {
        let pct = (count as f64 / result.games as f64) * 100.0;
        let bar_width = ((pct / 2.5) as usize).min(40);
        let bar = format!(
            "{}{}",
            "█".repeat(bar_width).green(),
            "░".repeat(40 - bar_width).bright_black()
        );
        println!("   {attempts:>3}: {bar} {count:4} ({pct:5.1}%)");
    }
}
