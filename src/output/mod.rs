//! Terminal output formatting
//!
//! Display utilities for the text shell and command reports.

pub mod display;
pub mod formatters;

pub use display::{
    print_board, print_highscores, print_ledger, print_simulation_result, print_win_banner,
};
