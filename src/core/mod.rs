//! Core domain types for the memory game
//!
//! Board layout, tile state, coordinates and sizes. Everything here is pure
//! and owns no I/O; randomness is injected by the caller.

mod board;
mod coord;
mod size;

pub use board::{Board, BoardError, TileState};
pub use coord::{Coord, CoordError, RawCoord, row_letter, validate};
pub use size::{BoardSize, MAX_COLS, MAX_ROWS, SizeError};
