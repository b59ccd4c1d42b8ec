//! Recover the falling piece from the field markings.
//!
//! The game reports a piece type and anchor but not its orientation, so the
//! orientation is found by matching each candidate against the cells marked
//! as piece inside the bounding box.

use tandem_core::{Board, CellState, Orientation, Piece};

use crate::active::ActivePiece;
use crate::error::LiftError;

/// Find the orientation matching the markings, then clear those markings.
///
/// The piece box must overlap the field; anything further out is rejected
/// before any coordinate arithmetic.
pub fn lift(board: &mut Board, piece: Piece, anchor: (i8, i8)) -> Result<ActivePiece, LiftError> {
    if !box_overlaps(board, piece.size(), anchor) {
        return Err(LiftError::AnchorOffField {
            piece,
            x: anchor.0,
            y: anchor.1,
        });
    }

    let mut candidate = ActivePiece::new(piece, anchor);
    for turns in 0..4 {
        candidate.set_orientation(Orientation::new(turns));
        if matches_markings(board, &candidate) {
            clear_box(board, &candidate);
            return Ok(candidate);
        }
    }
    Err(LiftError::NoMatchingOrientation {
        piece,
        x: anchor.0,
        y: anchor.1,
    })
}

/// Every on-field box cell is marked iff the candidate occupies it.
fn matches_markings(board: &Board, candidate: &ActivePiece) -> bool {
    box_cells(candidate).all(|(x, y)| match board.cell(x, y) {
        Some(state) => candidate.is_at(x, y) == (state == CellState::Piece),
        None => true,
    })
}

fn box_overlaps(board: &Board, size: i8, (x, y): (i8, i8)) -> bool {
    let overlaps = |start: i8, len: usize| -size < start && (start as i64) < len as i64;
    overlaps(x, board.width()) && overlaps(y, board.height())
}

fn clear_box(board: &mut Board, candidate: &ActivePiece) {
    for (x, y) in box_cells(candidate) {
        if board.cell(x, y) == Some(CellState::Piece) {
            board.set(x as usize, y as usize, CellState::Empty);
        }
    }
}

fn box_cells(candidate: &ActivePiece) -> impl Iterator<Item = (i8, i8)> {
    let (ax, ay) = candidate.location();
    let size = candidate.piece().size();
    (ay..ay + size).flat_map(move |y| (ax..ax + size).map(move |x| (x, y)))
}
