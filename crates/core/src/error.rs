use thiserror::Error;

/// Malformed turn input. Fatal: reported before any search runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("board dimensions {width}x{height} out of range")]
    Dimensions { width: usize, height: usize },
    #[error("field has {found} rows, expected {expected}")]
    MissingRow { expected: usize, found: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    MissingCell {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("bad cell code {code:?} at ({x}, {y})")]
    CellCode { x: usize, y: usize, code: String },
    #[error("unknown piece {0:?}")]
    Piece(String),
    #[error("unknown move {0:?}")]
    Move(String),
}
