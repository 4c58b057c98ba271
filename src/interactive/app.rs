//! TUI application state and logic

use crate::config::GameConfig;
use crate::core::{Coord, validate};
use crate::game::{ConcealScheduler, Deferred, GameSession, SelectOutcome};
use crate::highscores::{HighscoreEntry, HighscoreLedger};
use crate::wordlists::WordPool;
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::warn;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::{Duration, Instant};

/// How long to wait for a key when no conceal is due
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Application state
pub struct App {
    pub config: GameConfig,
    pub pool: WordPool,
    pub rng: StdRng,
    pub session: GameSession,
    pub scheduler: Deferred,
    pub ledger: HighscoreLedger,
    pub cursor: Coord,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub name_buffer: String,
    pub last_rank: Option<usize>,
    pub messages: Vec<Message>,
    pub stats: Statistics,
    pub should_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Picking,
    NameEntry,
    WinCelebration,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

#[derive(Debug, Default, Clone)]
pub struct Statistics {
    pub total_games: usize,
    pub games_won: usize,
    pub best_attempts: Option<u32>,
}

impl App {
    /// Load the word list and highscores and deal the first board
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be loaded or the word list is
    /// too small for the configured board.
    pub fn new(config: GameConfig) -> Result<Self> {
        let pool = config.pool().context("cannot load word list")?;
        let ledger = config.ledger().context("cannot load highscores")?;
        let mut rng = config.rng();
        let session = GameSession::start(&pool, config.size, &mut rng)?;
        let scheduler = Deferred::new(config.conceal_delay);

        let mut app = Self {
            config,
            pool,
            rng,
            session,
            scheduler,
            ledger,
            cursor: Coord::new(0, 0),
            input_mode: InputMode::Picking,
            input_buffer: String::new(),
            name_buffer: String::new(),
            last_rank: None,
            messages: Vec::new(),
            stats: Statistics {
                total_games: 1,
                ..Statistics::default()
            },
            should_quit: false,
        };
        app.add_message(
            "Welcome! Find every matching pair in as few attempts as you can.",
            MessageStyle::Info,
        );
        app.add_message(
            "Move with the arrows and press Space, or type a label like B3.",
            MessageStyle::Info,
        );
        Ok(app)
    }

    /// Deal a fresh board of the configured size
    ///
    /// # Errors
    ///
    /// Returns an error if the word list cannot fill the board.
    pub fn new_game(&mut self) -> Result<()> {
        self.session = GameSession::start(&self.pool, self.config.size, &mut self.rng)?;
        self.scheduler = Deferred::new(self.config.conceal_delay);
        self.cursor = Coord::new(0, 0);
        self.input_buffer.clear();
        self.name_buffer.clear();
        self.last_rank = None;
        self.messages.clear();
        self.input_mode = InputMode::Picking;
        self.stats.total_games += 1;
        self.add_message(
            &format!("New {} game started!", self.config.size),
            MessageStyle::Info,
        );
        Ok(())
    }

    /// Whether picks are blocked until the mismatched pair is flipped back
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Move the cursor, staying on the board
    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let board = self.session.board();
        let row = self.cursor.row.saturating_add_signed(d_row).min(board.rows() - 1);
        let col = self.cursor.col.saturating_add_signed(d_col).min(board.cols() - 1);
        self.cursor = Coord::new(row, col);
    }

    /// Turn over the tile under the cursor
    pub fn pick_cursor(&mut self, now: Instant) {
        self.pick(self.cursor, now);
    }

    /// Turn over the tile typed in the input box
    pub fn submit_input(&mut self, now: Instant) {
        let text = std::mem::take(&mut self.input_buffer);
        if self.is_locked() {
            self.add_message("Wait for the tiles to flip back.", MessageStyle::Error);
            return;
        }
        match validate(&text, self.session.board().rows(), self.session.board().cols()) {
            Ok(coord) => {
                self.cursor = coord;
                self.pick(coord, now);
            }
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    /// Select a tile and react to the outcome
    pub fn pick(&mut self, coord: Coord, now: Instant) {
        if self.is_locked() {
            self.add_message("Wait for the tiles to flip back.", MessageStyle::Error);
            return;
        }

        match self.session.select(coord) {
            Ok(SelectOutcome::FirstRevealed { coord }) => {
                let value = self.value_text(coord);
                self.add_message(&format!("{coord}: {value}"), MessageStyle::Info);
            }
            Ok(SelectOutcome::Matched { pair }) => {
                let value = self.value_text(pair[0]);
                self.add_message(
                    &format!("Match! {} and {} are both {value}", pair[0], pair[1]),
                    MessageStyle::Success,
                );
            }
            Ok(SelectOutcome::Mismatched { pair }) => {
                let value = self.value_text(pair[1]);
                self.add_message(
                    &format!("{}: {value}, no match", pair[1]),
                    MessageStyle::Error,
                );
                self.scheduler.on_mismatch(pair, now);
            }
            Ok(SelectOutcome::Won { attempts, .. }) => self.on_won(attempts),
            Err(e) => self.add_message(&e.to_string(), MessageStyle::Error),
        }
    }

    fn on_won(&mut self, attempts: u32) {
        self.stats.games_won += 1;
        self.stats.best_attempts = Some(self.stats.best_attempts.map_or(attempts, |b| b.min(attempts)));

        let pairs = self.session.total_pairs();
        let celebration = if usize::try_from(attempts).is_ok_and(|a| a == pairs) {
            "🏆 PERFECT MEMORY! Not a single miss! 🏆"
        } else {
            "🎉 ALL PAIRS FOUND! 🎉"
        };
        self.add_message(celebration, MessageStyle::Success);
        self.add_message(
            &format!("Cleared in {attempts} attempts. Enter your name for the highscores."),
            MessageStyle::Info,
        );
        self.name_buffer = self.config.player.clone();
        self.input_mode = InputMode::NameEntry;
    }

    /// Record the finished game under the typed name and save the ledger
    pub fn submit_name(&mut self) {
        let Some(size) = self.session.size() else {
            return;
        };
        let entry = match HighscoreEntry::new(&self.name_buffer, self.session.attempts(), size) {
            Ok(entry) => entry,
            Err(e) => {
                self.add_message(&e.to_string(), MessageStyle::Error);
                return;
            }
        };

        self.last_rank = self.ledger.record(entry);
        match self.last_rank {
            Some(rank) => self.add_message(&format!("New highscore, rank {rank}!"), MessageStyle::Success),
            None => self.add_message(
                &format!("Not in the top {} this time.", self.ledger.cap()),
                MessageStyle::Info,
            ),
        }
        if let Err(e) = self.ledger.persist(&self.config.scores_path) {
            warn!("{e}");
            self.add_message(&format!("Could not save highscores: {e}"), MessageStyle::Error);
        }

        self.add_message("Press 'n' for new game or 'q' to quit.", MessageStyle::Info);
        self.input_mode = InputMode::WinCelebration;
    }

    /// Flip back a mismatched pair once its delay has passed
    pub fn tick(&mut self, now: Instant) {
        if let Some(pair) = self.scheduler.poll(&mut self.session, now) {
            self.add_message(
                &format!("{} and {} flipped back", pair[0], pair[1]),
                MessageStyle::Info,
            );
        }
    }

    /// How long the event loop may block before the next tick is needed
    #[must_use]
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.scheduler
            .deadline()
            .map_or(IDLE_POLL, |due| due.saturating_duration_since(now).min(IDLE_POLL))
    }

    fn value_text(&self, coord: Coord) -> String {
        self.session
            .board()
            .value_at(coord)
            .map(str::to_string)
            .unwrap_or_default()
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    /// Apply one key press
    ///
    /// # Errors
    ///
    /// Returns an error if a new game cannot be dealt.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Ok(());
        }

        match self.input_mode {
            InputMode::WinCelebration => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('n') => self.new_game()?,
                _ => {}
            },
            InputMode::NameEntry => match key.code {
                KeyCode::Enter => self.submit_name(),
                KeyCode::Backspace => {
                    self.name_buffer.pop();
                }
                KeyCode::Char(c) if c != ',' => self.name_buffer.push(c),
                _ => {}
            },
            InputMode::Picking => match key.code {
                KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.new_game()?;
                }
                KeyCode::Up => self.move_cursor(-1, 0),
                KeyCode::Down => self.move_cursor(1, 0),
                KeyCode::Left => self.move_cursor(0, -1),
                KeyCode::Right => self.move_cursor(0, 1),
                KeyCode::Char(' ') if self.input_buffer.is_empty() => self.pick_cursor(now),
                KeyCode::Enter => {
                    if self.input_buffer.trim().is_empty() {
                        self.input_buffer.clear();
                        self.pick_cursor(now);
                    } else {
                        self.submit_input(now);
                    }
                }
                KeyCode::Char(c) if c.is_ascii_alphanumeric() || c == ' ' || c == ',' => {
                    self.input_buffer.push(c);
                }
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                _ => {}
            },
        }
        Ok(())
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        // Wake up in time to flip a mismatched pair back
        if !event::poll(app.poll_timeout(Instant::now()))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key, Instant::now())?;
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
