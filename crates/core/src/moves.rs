//! Move vocabulary and placement outcomes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::FieldError;

/// One discrete input sent to the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Move {
    Left,
    Right,
    TurnLeft,
    TurnRight,
    /// One row soft drop.
    Down,
    /// Commit the piece where it would land.
    Drop,
    /// Discard the current piece, spending a skip.
    Skip,
}

impl Move {
    pub fn is_rotation(self) -> bool {
        matches!(self, Move::TurnLeft | Move::TurnRight)
    }

    pub fn is_drop(self) -> bool {
        matches!(self, Move::Down | Move::Drop)
    }

    pub fn name(self) -> &'static str {
        match self {
            Move::Left => "left",
            Move::Right => "right",
            Move::TurnLeft => "turnleft",
            Move::TurnRight => "turnright",
            Move::Down => "down",
            Move::Drop => "drop",
            Move::Skip => "skip",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Move {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "left" => Ok(Move::Left),
            "right" => Ok(Move::Right),
            "turnleft" => Ok(Move::TurnLeft),
            "turnright" => Ok(Move::TurnRight),
            "down" => Ok(Move::Down),
            "drop" => Ok(Move::Drop),
            "skip" => Ok(Move::Skip),
            other => Err(FieldError::Move(other.to_string())),
        }
    }
}

/// What a single placement did to the board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Outcome {
    pub cleared: u8,
    /// T-spin that cleared at least one row.
    pub spin: bool,
}

impl Outcome {
    pub fn new(cleared: u8, spin: bool) -> Self {
        Self { cleared, spin }
    }

    /// Rows cleared by a spin, 0 for anything else.
    pub fn spin_rows(self) -> u8 {
        if self.spin {
            self.cleared
        } else {
            0
        }
    }
}
