//! Piece catalog: box sizes, orientation-0 cells, spawn anchors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FieldError;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Piece {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

/// Quarter turns clockwise from spawn, 0..=3.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Orientation(u8);

impl Orientation {
    pub const SPAWN: Self = Self(0);

    pub const fn new(turns: u8) -> Self {
        Self(turns % 4)
    }

    #[inline(always)]
    pub fn index(self) -> u8 {
        self.0
    }

    pub fn cw(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    pub fn ccw(self) -> Self {
        Self((self.0 + 3) % 4)
    }
}

impl Piece {
    pub const ALL: [Piece; 7] = [
        Piece::I,
        Piece::J,
        Piece::L,
        Piece::O,
        Piece::S,
        Piece::T,
        Piece::Z,
    ];

    /// Side of the square bounding box.
    pub fn size(self) -> i8 {
        match self {
            Piece::I => 4,
            Piece::O => 2,
            _ => 3,
        }
    }

    /// Occupied (x, y) offsets inside the box at orientation 0.
    pub fn base_cells(self) -> [(i8, i8); 4] {
        match self {
            Piece::I => [(0, 1), (1, 1), (2, 1), (3, 1)],
            Piece::J => [(0, 0), (0, 1), (1, 1), (2, 1)],
            Piece::L => [(2, 0), (0, 1), (1, 1), (2, 1)],
            Piece::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
            Piece::S => [(1, 0), (2, 0), (0, 1), (1, 1)],
            Piece::T => [(1, 0), (0, 1), (1, 1), (2, 1)],
            Piece::Z => [(0, 0), (1, 0), (1, 1), (2, 1)],
        }
    }

    /// Occupied offsets inside the box for the given orientation.
    /// Each clockwise quarter turn is a transpose followed by a column flip.
    pub fn cells(self, orientation: Orientation) -> [(i8, i8); 4] {
        let mut cells = self.base_cells();
        for _ in 0..orientation.index() {
            for cell in cells.iter_mut() {
                *cell = rotate_cw(*cell, self.size());
            }
        }
        cells
    }

    /// Anchor (top-left of the box) a freshly spawned piece takes.
    /// One row above the field, centred.
    pub fn spawn(self, board_width: usize) -> (i8, i8) {
        let x = (board_width as i8 - self.size()) / 2;
        (x, -1)
    }
}

#[inline]
pub fn rotate_cw((x, y): (i8, i8), size: i8) -> (i8, i8) {
    (size - 1 - y, x)
}

#[inline]
pub fn rotate_ccw((x, y): (i8, i8), size: i8) -> (i8, i8) {
    (y, size - 1 - x)
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Piece::I => "I",
            Piece::J => "J",
            Piece::L => "L",
            Piece::O => "O",
            Piece::S => "S",
            Piece::T => "T",
            Piece::Z => "Z",
        };
        f.write_str(letter)
    }
}

impl FromStr for Piece {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "I" => Ok(Piece::I),
            "J" => Ok(Piece::J),
            "L" => Ok(Piece::L),
            "O" => Ok(Piece::O),
            "S" => Ok(Piece::S),
            "T" => Ok(Piece::T),
            "Z" => Ok(Piece::Z),
            other => Err(FieldError::Piece(other.to_string())),
        }
    }
}
