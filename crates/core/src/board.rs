//! board representation - row-major cell grid, row 0 at the top
//! sized per game, cloned freely for hypothetical placements

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::FieldError;

/// State of a single field cell. Discriminants are the wire codes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty = 0,
    /// Marking of the falling piece as reported by the game.
    Piece = 1,
    Block = 2,
    /// Garbage that never clears.
    Solid = 3,
}

impl CellState {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            1 => Some(Self::Piece),
            2 => Some(Self::Block),
            3 => Some(Self::Solid),
            _ => None,
        }
    }

    #[inline(always)]
    pub fn code(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }

    #[inline(always)]
    pub fn is_block(self) -> bool {
        self == Self::Block
    }

    /// Blocks pieces from moving through.
    #[inline(always)]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Block | Self::Solid)
    }
}

/// Playing field of `width` x `height` cells.
/// x grows to the right, y grows downwards (row 0 is the top).
/// Also carries the block height cached by the evaluator.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
    block_height: usize,
}

impl Board {
    /// Largest accepted width or height; piece coordinates are `i8`.
    pub const MAX_DIMENSION: usize = 64;

    pub fn new(width: usize, height: usize) -> Result<Self, FieldError> {
        if width == 0 || height == 0 || width > Self::MAX_DIMENSION || height > Self::MAX_DIMENSION
        {
            return Err(FieldError::Dimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![CellState::Empty; width * height],
            block_height: 0,
        })
    }

    /// Parse the game's field encoding: rows split by `;`, cells by `,`.
    /// Anything past the declared size is ignored.
    pub fn parse(width: usize, height: usize, field: &str) -> Result<Self, FieldError> {
        let mut board = Self::new(width, height)?;
        let mut rows = field.split(';');
        for y in 0..height {
            let row = rows.next().ok_or(FieldError::MissingRow {
                expected: height,
                found: y,
            })?;
            let mut codes = row.split(',');
            for x in 0..width {
                let raw = codes.next().ok_or(FieldError::MissingCell {
                    row: y,
                    expected: width,
                    found: x,
                })?;
                let state = raw
                    .trim()
                    .parse::<u8>()
                    .ok()
                    .and_then(CellState::from_code)
                    .ok_or_else(|| FieldError::CellCode {
                        x,
                        y,
                        code: raw.trim().to_string(),
                    })?;
                board.set(x, y, state);
            }
        }
        Ok(board)
    }

    #[inline(always)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bounds-checked read; `None` outside the grid.
    #[inline]
    pub fn cell(&self, x: i8, y: i8) -> Option<CellState> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize])
    }

    #[inline(always)]
    pub fn get(&self, x: usize, y: usize) -> CellState {
        self.cells[y * self.width + x]
    }

    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, state: CellState) {
        self.cells[y * self.width + x] = state;
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).iter().all(|c| c.is_block())
    }

    pub fn is_row_empty(&self, y: usize) -> bool {
        self.row(y).iter().all(|c| c.is_empty())
    }

    pub fn row(&self, y: usize) -> &[CellState] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Drop every full row, sliding the rows above down. Returns rows removed.
    pub fn remove_full_rows(&mut self) -> u8 {
        let width = self.width;
        let mut cleared = 0u8;
        let mut write = self.height;
        for read in (0..self.height).rev() {
            if self.is_row_full(read) {
                cleared += 1;
                continue;
            }
            write -= 1;
            if write != read {
                self.cells
                    .copy_within(read * width..(read + 1) * width, write * width);
            }
        }
        self.cells[..write * width].fill(CellState::Empty);
        cleared
    }

    /// Full rows present right now, board untouched.
    pub fn count_full_rows(&self) -> u8 {
        (0..self.height).filter(|&y| self.is_row_full(y)).count() as u8
    }

    /// Tallest column as last measured by the evaluator.
    #[inline(always)]
    pub fn block_height(&self) -> usize {
        self.block_height
    }

    #[inline(always)]
    pub fn set_block_height(&mut self, height: usize) {
        self.block_height = height;
    }

    /// Clear every active piece marking.
    pub fn clear_piece_markings(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| **c == CellState::Piece) {
            *cell = CellState::Empty;
        }
    }

    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for (x, cell) in self.row(y).iter().enumerate() {
                if x > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", cell.code())?;
            }
            if y + 1 != self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
