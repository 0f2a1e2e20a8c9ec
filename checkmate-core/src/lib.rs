//! Checkmate Core - check and checkmate detection
//!
//! This crate provides:
//! - Board geometry (8x8 grid, row/column squares)
//! - Attack geometry predicates per threat category
//! - Check evaluation, static and after a hypothetical move
//! - Checkmate search driven by an external move legality oracle
//! - Structural move rules usable as that oracle
//! - JSON position files

pub mod board;
pub mod pieces;
pub mod error;
pub mod attacks;
pub mod check;
pub mod oracle;
pub mod checkmate;
pub mod rules;
pub mod position;

// Re-exports for convenient access
pub use board::{Board, Move, Square, BOARD_SIZE};
pub use pieces::{Piece, PieceKind, Player};
pub use error::{BoardError, CheckError};
pub use attacks::{Geometry, Threats, GEOMETRIES};
pub use check::{is_check_after_move, is_check_static, locate_king, threats};
pub use oracle::{GameBoard, MoveOracle};
pub use checkmate::{
    find_escape, is_checkmate, is_checkmate_on, Escape, EscapeKind, MateSearch, MateSearchConfig, Verdict,
};
pub use rules::StandardRules;
pub use position::Position;
