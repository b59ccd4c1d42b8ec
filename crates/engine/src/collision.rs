//! collision detection - walls, floor, settled cells

use tandem_core::{Board, Piece};

use crate::active::ActivePiece;
use crate::movement::Pose;

/// Does any occupied cell sit on a settled cell?
/// Cells off the grid never collide; `out_of_bounds` covers those.
#[inline]
pub fn collides(board: &Board, piece: &ActivePiece) -> bool {
    piece
        .blocks()
        .iter()
        .any(|&(x, y)| board.cell(x, y).is_some_and(|c| c.is_settled()))
}

/// Left, right or below the field. Rows above the field are allowed.
#[inline]
pub fn out_of_bounds(board: &Board, piece: &ActivePiece) -> bool {
    piece
        .blocks()
        .iter()
        .any(|&(x, y)| x < 0 || x as usize >= board.width() || y >= board.height() as i8)
}

/// can the piece exist here?
#[inline]
pub fn is_valid(board: &Board, piece: &ActivePiece) -> bool {
    !(collides(board, piece) || out_of_bounds(board, piece))
}

#[inline]
pub fn can_place(board: &Board, piece: Piece, pose: Pose) -> bool {
    is_valid(board, &ActivePiece::at(piece, pose))
}

/// Resting pose: one row lower is invalid. Says nothing about `pose` itself.
#[inline]
pub fn is_terminal(board: &Board, piece: Piece, pose: Pose) -> bool {
    !can_place(board, piece, pose.shifted(0, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::{CellState, Orientation};

    fn board() -> Board {
        Board::new(10, 20).unwrap()
    }

    #[test]
    fn test_no_collision_empty_board() {
        let p = ActivePiece::new(Piece::T, (3, 5));
        assert!(!collides(&board(), &p));
        assert!(is_valid(&board(), &p));
    }

    #[test]
    fn test_walls() {
        let b = board();
        assert!(out_of_bounds(&b, &ActivePiece::new(Piece::T, (-1, 5))));
        assert!(out_of_bounds(&b, &ActivePiece::new(Piece::T, (8, 5))));
        assert!(!out_of_bounds(&b, &ActivePiece::new(Piece::T, (7, 5))));
    }

    #[test]
    fn test_above_field_is_in_bounds() {
        let b = board();
        // T nub sits at y = -1
        assert!(is_valid(&b, &ActivePiece::new(Piece::T, (3, -1))));
    }

    #[test]
    fn test_floor() {
        let b = board();
        // T spawn shape occupies box rows 0 and 1
        assert!(is_valid(&b, &ActivePiece::new(Piece::T, (3, 18))));
        assert!(out_of_bounds(&b, &ActivePiece::new(Piece::T, (3, 19))));
        assert!(is_terminal(&b, Piece::T, Pose::new(3, 18, Orientation::SPAWN)));
        assert!(!is_terminal(&b, Piece::T, Pose::new(3, 17, Orientation::SPAWN)));
    }

    #[test]
    fn test_collision_with_blocks() {
        let mut b = board();
        b.set(4, 10, CellState::Block);
        assert!(collides(&b, &ActivePiece::new(Piece::T, (3, 9))));
        assert!(!collides(&b, &ActivePiece::new(Piece::T, (3, 7))));
        assert!(is_terminal(&b, Piece::T, Pose::new(3, 8, Orientation::SPAWN)));
    }

    #[test]
    fn test_piece_markings_do_not_collide() {
        let mut b = board();
        b.set(4, 10, CellState::Piece);
        assert!(!collides(&b, &ActivePiece::new(Piece::T, (3, 9))));
        b.set(4, 10, CellState::Solid);
        assert!(collides(&b, &ActivePiece::new(Piece::T, (3, 9))));
    }
}
