//! T-spin detection: a rotation into a pocket with three blocked corners.

use tandem_core::{Board, Move, Piece};

use crate::active::ActivePiece;

/// Box corners, relative to the anchor, of a 3x3 T box.
const CORNERS: [(i8, i8); 4] = [(0, 0), (2, 0), (0, 2), (2, 2)];

/// Would settling `piece` here count as a T-spin?
///
/// `last` is the move that brought the piece into its pose and `previous`
/// the one before it; `last_anchor` is the anchor the piece had after
/// `previous`. A spin needs the last move to be a rotation, or a drop
/// straight after a rotation with the anchor unchanged since then. On top of
/// that at least three of the four box corners must hold settled blocks.
/// Corners outside the field do not count.
pub fn is_t_spin(
    board: &Board,
    piece: &ActivePiece,
    last: Move,
    previous: Move,
    last_anchor: (i8, i8),
) -> bool {
    if piece.piece() != Piece::T {
        return false;
    }

    let rotated_in = last.is_rotation()
        || (last.is_drop() && previous.is_rotation() && last_anchor == piece.location());
    if !rotated_in {
        return false;
    }

    blocked_corners(board, piece) >= 3
}

pub(crate) fn blocked_corners(board: &Board, piece: &ActivePiece) -> usize {
    let (x, y) = piece.location();
    CORNERS
        .iter()
        .filter(|&&(dx, dy)| board.cell(x + dx, y + dy).is_some_and(|c| c.is_block()))
        .count()
}
