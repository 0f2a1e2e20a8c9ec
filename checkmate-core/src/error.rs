//! Error types

use crate::pieces::Player;

/// Errors raised while evaluating check on a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("no {0} king on the board")]
    KingNotFound(Player),
}

/// Errors raised while parsing a board diagram
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row}: expected {expected} cells, found {found}")]
    RowLength { row: usize, expected: usize, found: usize },

    #[error("row {row}, col {col}: unknown symbol '{symbol}'")]
    UnknownSymbol { row: usize, col: usize, symbol: char },
}
