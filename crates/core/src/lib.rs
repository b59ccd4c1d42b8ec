//! tandem core crate - board, piece catalog and move vocabulary.

mod board;
mod error;
mod moves;
mod piece;
mod state;

pub use board::{Board, CellState};
pub use error::FieldError;
pub use moves::{Move, Outcome};
pub use piece::{rotate_ccw, rotate_cw, Orientation, Piece};
pub use state::TurnState;
