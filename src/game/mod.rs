//! Core Connect Four game logic: the board engine, player types, and the
//! session driver that sequences turns.

mod board;
mod player;
mod session;

pub use board::{Board, Cell, Dimensions, MoveError, WIN_LENGTH};
pub use player::Player;
pub use session::{GameOutcome, GameSession, PlayError};
