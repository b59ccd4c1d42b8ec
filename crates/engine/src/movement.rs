//! Poses and the five primitive moves between them.

use tandem_core::{Board, Move, Orientation, Piece};

use crate::collision::can_place;

/// A piece's (x, y, orientation) on the board. Identity of search states.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Pose {
    pub x: i8,
    pub y: i8,
    pub orientation: Orientation,
}

impl Pose {
    pub fn new(x: i8, y: i8, orientation: Orientation) -> Self {
        Self { x, y, orientation }
    }

    pub fn shifted(self, dx: i8, dy: i8) -> Self {
        Self::new(self.x + dx, self.y + dy, self.orientation)
    }

    pub fn turned(self, clockwise: bool) -> Self {
        let orientation = if clockwise {
            self.orientation.cw()
        } else {
            self.orientation.ccw()
        };
        Self::new(self.x, self.y, orientation)
    }

    #[inline(always)]
    pub fn location(self) -> (i8, i8) {
        (self.x, self.y)
    }

    /// Pose after one primitive move. `None` for moves that end the turn.
    pub fn step(self, mv: Move) -> Option<Self> {
        match mv {
            Move::Left => Some(self.shifted(-1, 0)),
            Move::Right => Some(self.shifted(1, 0)),
            Move::TurnLeft => Some(self.turned(false)),
            Move::TurnRight => Some(self.turned(true)),
            Move::Down => Some(self.shifted(0, 1)),
            Move::Drop | Move::Skip => None,
        }
    }
}

/// The primitive move that turns `from` into `to`.
/// Only meaningful for poses one move apart.
pub fn move_between(from: Pose, to: Pose) -> Move {
    if to.orientation == from.orientation.ccw() {
        Move::TurnLeft
    } else if to.orientation == from.orientation.cw() {
        Move::TurnRight
    } else if to.x - from.x == 1 {
        Move::Right
    } else if to.x - from.x == -1 {
        Move::Left
    } else {
        Move::Down
    }
}

/// Try to move piece horizontally
pub fn try_shift(board: &Board, piece: Piece, pose: Pose, dx: i8) -> Option<Pose> {
    let next = pose.shifted(dx, 0);
    can_place(board, piece, next).then_some(next)
}

/// Try to move piece down one row (soft drop)
pub fn try_drop(board: &Board, piece: Piece, pose: Pose) -> Option<Pose> {
    let next = pose.shifted(0, 1);
    can_place(board, piece, next).then_some(next)
}

/// Rotate in place. There are no kicks: a blocked rotation fails.
pub fn try_rotate(board: &Board, piece: Piece, pose: Pose, clockwise: bool) -> Option<Pose> {
    let next = pose.turned(clockwise);
    can_place(board, piece, next).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::CellState;

    fn spawn() -> Pose {
        Pose::new(3, 5, Orientation::SPAWN)
    }

    #[test]
    fn test_move_between() {
        let p = spawn();
        assert_eq!(move_between(p, p.turned(true)), Move::TurnRight);
        assert_eq!(move_between(p, p.turned(false)), Move::TurnLeft);
        assert_eq!(move_between(p, p.shifted(1, 0)), Move::Right);
        assert_eq!(move_between(p, p.shifted(-1, 0)), Move::Left);
        assert_eq!(move_between(p, p.shifted(0, 1)), Move::Down);
    }

    #[test]
    fn test_step_inverts_move_between() {
        let p = spawn();
        for next in [p.turned(true), p.turned(false), p.shifted(1, 0), p.shifted(-1, 0), p.shifted(0, 1)] {
            assert_eq!(p.step(move_between(p, next)), Some(next));
        }
        assert_eq!(p.step(Move::Drop), None);
    }

    #[test]
    fn test_shift_blocked_by_wall() {
        let b = Board::new(10, 20).unwrap();
        let at_wall = Pose::new(0, 5, Orientation::SPAWN);
        assert_eq!(try_shift(&b, Piece::T, at_wall, -1), None);
        assert_eq!(try_shift(&b, Piece::T, at_wall, 1), Some(at_wall.shifted(1, 0)));
    }

    #[test]
    fn test_rotation_without_kicks() {
        let mut b = Board::new(10, 20).unwrap();
        let p = Pose::new(3, 5, Orientation::SPAWN);
        assert!(try_rotate(&b, Piece::T, p, true).is_some());
        // cell (4, 7) is under the stem of the rotated T
        b.set(4, 7, CellState::Block);
        assert_eq!(try_rotate(&b, Piece::T, p, true), None);
    }

    #[test]
    fn test_drop_onto_floor() {
        let b = Board::new(10, 20).unwrap();
        let resting = Pose::new(3, 18, Orientation::SPAWN);
        assert_eq!(try_drop(&b, Piece::T, resting), None);
        assert_eq!(try_drop(&b, Piece::T, resting.shifted(0, -1)), Some(resting));
    }
}
