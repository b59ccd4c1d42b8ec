//! Per-turn input.

use serde::{Deserialize, Serialize};

use crate::{Board, Piece};

/// Everything the game reports before asking for moves.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TurnState {
    /// Live field, current piece still marked with `CellState::Piece`.
    pub board: Board,
    pub current_piece: Piece,
    /// Last reported anchor of the current piece.
    pub piece_location: (i8, i8),
    pub next_piece: Piece,
    pub skips: u32,
}

impl TurnState {
    pub fn new(board: Board, current_piece: Piece, piece_location: (i8, i8), next_piece: Piece) -> Self {
        Self {
            board,
            current_piece,
            piece_location,
            next_piece,
            skips: 0,
        }
    }

    pub fn with_skips(mut self, skips: u32) -> Self {
        self.skips = skips;
        self
    }
}
