//! The falling piece: type, orientation and anchor.

use tandem_core::{Orientation, Piece};

use crate::movement::Pose;

/// Piece instance on a board. The anchor is the top-left corner of its box.
/// Mutations only move the piece; nothing here touches a board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct ActivePiece {
    piece: Piece,
    orientation: Orientation,
    x: i8,
    y: i8,
}

impl ActivePiece {
    pub fn new(piece: Piece, (x, y): (i8, i8)) -> Self {
        Self {
            piece,
            orientation: Orientation::SPAWN,
            x,
            y,
        }
    }

    /// Spawn anchor, orientation 0.
    pub fn spawn(piece: Piece, board_width: usize) -> Self {
        Self::new(piece, piece.spawn(board_width))
    }

    pub fn at(piece: Piece, pose: Pose) -> Self {
        Self {
            piece,
            orientation: pose.orientation,
            x: pose.x,
            y: pose.y,
        }
    }

    #[inline(always)]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    #[inline(always)]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline(always)]
    pub fn location(&self) -> (i8, i8) {
        (self.x, self.y)
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.x, self.y, self.orientation)
    }

    pub fn turn_right(&mut self) {
        self.orientation = self.orientation.cw();
    }

    pub fn turn_left(&mut self) {
        self.orientation = self.orientation.ccw();
    }

    pub fn shift(&mut self, dx: i8, dy: i8) {
        self.x += dx;
        self.y += dy;
    }

    pub fn set_location(&mut self, x: i8, y: i8) {
        self.x = x;
        self.y = y;
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Board coordinates of the four occupied cells.
    pub fn blocks(&self) -> [(i8, i8); 4] {
        self.piece
            .cells(self.orientation)
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn is_at(&self, x: i8, y: i8) -> bool {
        self.blocks().contains(&(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_follow_anchor() {
        let mut p = ActivePiece::new(Piece::O, (4, 0));
        assert!(p.is_at(4, 0) && p.is_at(5, 1));
        p.shift(-1, 2);
        assert_eq!(p.location(), (3, 2));
        assert!(p.is_at(3, 2) && p.is_at(4, 3));
        assert!(!p.is_at(5, 1));
    }

    #[test]
    fn test_set_location_moves_every_block() {
        let mut p = ActivePiece::new(Piece::T, (3, -1));
        let before = p.blocks();
        p.set_location(0, 17);
        assert_eq!(p.location(), (0, 17));
        for ((bx, by), (ax, ay)) in before.into_iter().zip(p.blocks()) {
            assert_eq!((ax - bx, ay - by), (-3, 18));
        }
        assert_eq!(p.orientation(), Orientation::SPAWN);
    }

    #[test]
    fn test_turns_keep_anchor() {
        let mut p = ActivePiece::new(Piece::I, (3, 5));
        p.turn_right();
        assert_eq!(p.orientation(), Orientation::new(1));
        assert_eq!(p.location(), (3, 5));
        // vertical in box column 2
        let mut cells = p.blocks();
        cells.sort();
        assert_eq!(cells, [(5, 5), (5, 6), (5, 7), (5, 8)]);
        p.turn_left();
        assert_eq!(p.orientation(), Orientation::SPAWN);
    }

    #[test]
    fn test_pose_round_trip() {
        let mut p = ActivePiece::spawn(Piece::T, 10);
        p.turn_left();
        p.shift(2, 3);
        assert_eq!(ActivePiece::at(Piece::T, p.pose()), p);
    }
}
