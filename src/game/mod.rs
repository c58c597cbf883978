//! Core Connect Four game logic: board, players, win detection, and the
//! session state machine that drives a round.

mod board;
mod color;
mod player;
mod session;
pub mod win;

pub use board::{Board, BoardSnapshot, Cell, CellState, Position, MAX_DIMENSION};
pub use color::PlayerColor;
pub use player::{Player, PlayerId};
pub use session::{validate_setup, GameSession, MoveResult, Outcome, Phase};
