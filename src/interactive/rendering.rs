//! TUI rendering with ratatui
//!
//! Board grid, progress, highscores and messages.

use super::app::{App, InputMode, MessageStyle};
use crate::core::{Coord, TileState};
use crate::output::formatters::{board_header, cell_width, row_label, tile_text};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Board
            Constraint::Percentage(40), // Info
        ])
        .split(chunks[1]);

    render_board(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🧠 MEMORY GAME - Find the pairs")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn tile_style(state: TileState, under_cursor: bool) -> Style {
    let style = match state {
        TileState::Hidden => Style::default().fg(Color::DarkGray),
        TileState::Revealed => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        TileState::Matched => Style::default().fg(Color::Green),
    };
    if under_cursor {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let board = app.session.board();
    let width = cell_width(board);

    let mut lines = vec![
        Line::from(Span::styled(
            board_header(board.cols(), width),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    for row in 0..board.rows() {
        let mut spans = vec![Span::styled(
            format!("{:>2} ", row_label(row)),
            Style::default().fg(Color::DarkGray),
        )];
        for col in 0..board.cols() {
            let coord = Coord::new(row, col);
            let (Ok(value), Ok(state)) = (board.value_at(coord), board.state_at(coord)) else {
                continue;
            };
            let text = format!("{:^width$}", tile_text(value, state));
            spans.push(Span::styled(text, tile_style(state, coord == app.cursor)));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let title = format!(" Board {} ", app.config.size);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Pairs gauge
            Constraint::Percentage(50), // Highscores
            Constraint::Min(5),         // Messages
        ])
        .split(area);

    render_progress(f, app, chunks[0]);
    render_highscores(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_progress(f: &mut Frame, app: &App, area: Rect) {
    let matched = app.session.matched_pairs();
    let total = app.session.total_pairs().max(1);
    let progress_pct = u16::try_from(matched * 100 / total).unwrap_or(100);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Pairs Found ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(progress_pct)
        .label(format!(
            "{matched}/{} pairs | {} attempts",
            app.session.total_pairs(),
            app.session.attempts()
        ));

    f.render_widget(gauge, area);
}

fn render_highscores(f: &mut Frame, app: &App, area: Rect) {
    let key = app.ledger.key_for(app.config.size);
    let entries = app.ledger.top_n(&key, app.ledger.cap());

    let items: Vec<ListItem> = if entries.is_empty() {
        vec![ListItem::new("No scores yet").style(Style::default().fg(Color::DarkGray))]
    } else {
        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let rank = i + 1;
                let style = if app.last_rank == Some(rank) {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(format!("{rank:>2}. {:<14} {:>4}", entry.name(), entry.attempts()))
                    .style(style)
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Highscores {key} "))
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(list, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = match app.input_mode {
        InputMode::WinCelebration => (
            " 🎉 CONGRATULATIONS! 🎉 | Press 'n' for new game or 'q' to quit ",
            "",
            Color::Green,
        ),
        InputMode::NameEntry => (
            " Your name for the highscores | Enter to save ",
            app.name_buffer.as_str(),
            Color::Cyan,
        ),
        InputMode::Picking if app.is_locked() => (
            " Remember them... ",
            app.input_buffer.as_str(),
            Color::DarkGray,
        ),
        InputMode::Picking => (
            " Pick a tile (e.g. B3 or 1 2) | Space picks the highlighted tile ",
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let cursor = Paragraph::new(format!("Cursor: {}", app.cursor)).alignment(Alignment::Center);
    f.render_widget(cursor, chunks[0]);

    let stats_text = format!(
        "Games: {} | Won: {}",
        app.stats.total_games, app.stats.games_won
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[1]);

    let best_text = app
        .stats
        .best_attempts
        .map_or_else(|| "Best: -".to_string(), |best| format!("Best: {best}"));
    let best = Paragraph::new(best_text).alignment(Alignment::Center);
    f.render_widget(best, chunks[2]);

    let help_text = if app.input_mode == InputMode::WinCelebration {
        "q: Quit | n: New Game"
    } else {
        "Esc: Quit | Ctrl-N: New Game | Enter: Submit"
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn draws_board_labels() {
        let path = std::env::temp_dir().join(format!("memory_game_render_{}.txt", std::process::id()));
        let app = App::new(GameConfig {
            seed: Some(1),
            scores_path: path,
            ..GameConfig::default()
        })
        .unwrap();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui(f, &app)).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("MEMORY GAME"));
        assert!(text.contains("Board 4x4"));
        assert!(text.contains("---"));
        assert!(text.contains("Pairs Found"));
    }
}
