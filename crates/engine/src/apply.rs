use tandem_core::{Board, CellState, Outcome};

use crate::active::ActivePiece;
use crate::error::PlacementError;

/// Board after a placement, full rows already removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub board: Board,
    pub outcome: Outcome,
}

/// Settle the piece's cells as blocks. Leaves the board untouched on error.
pub fn stamp(board: &mut Board, piece: &ActivePiece) -> Result<(), PlacementError> {
    let blocks = piece.blocks();
    if let Some(&(x, y)) = blocks.iter().find(|&&(x, y)| board.cell(x, y).is_none()) {
        return Err(PlacementError::OffField { x, y });
    }
    for (x, y) in blocks {
        board.set(x as usize, y as usize, CellState::Block);
    }
    Ok(())
}

/// Reverse of `stamp`. Only valid while no rows were removed in between.
pub fn unstamp(board: &mut Board, piece: &ActivePiece) {
    for (x, y) in piece.blocks() {
        if board.cell(x, y).is_some() {
            board.set(x as usize, y as usize, CellState::Empty);
        }
    }
}

/// Settle the piece on a copy of `board` and clear full rows.
/// `spin_detected` only sticks when at least one row cleared.
pub fn apply_placement(
    board: &Board,
    piece: &ActivePiece,
    spin_detected: bool,
) -> Result<Placement, PlacementError> {
    let mut next = board.clone();
    stamp(&mut next, piece)?;
    let cleared = next.remove_full_rows();
    Ok(Placement {
        board: next,
        outcome: Outcome::new(cleared, spin_detected && cleared > 0),
    })
}
