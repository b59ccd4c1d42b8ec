use tandem_core::Piece;
use thiserror::Error;

/// Replaying a candidate onto a board diverged from the board itself.
/// Local to one candidate; the search discards it and carries on.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("cell ({x}, {y}) lies off the field and cannot be settled")]
    OffField { x: i8, y: i8 },
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LiftError {
    #[error("no orientation of {piece} at ({x}, {y}) matches the marked cells")]
    NoMatchingOrientation { piece: Piece, x: i8, y: i8 },
    #[error("{piece} anchor ({x}, {y}) puts its box off the field")]
    AnchorOffField { piece: Piece, x: i8, y: i8 },
}
