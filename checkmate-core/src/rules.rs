//! Structural move rules over a board snapshot
//!
//! `StandardRules` answers "may this piece move there" using piece movement
//! only. It ignores check safety, castling, en passant and promotion.

use crate::board::{Board, Move};
use crate::oracle::{GameBoard, MoveOracle};
use crate::pieces::{PieceKind, Player};

/// Board plus standard piece movement rules
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardRules {
    board: Board,
}

impl StandardRules {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn path_clear(&self, mv: Move) -> bool {
        let step_row = (mv.to.row - mv.from.row).signum();
        let step_col = (mv.to.col - mv.from.col).signum();
        let mut current = mv.from;

        while let Some(next) = current.offset(step_row, step_col) {
            if next == mv.to {
                return true;
            }
            if self.board.get(next).is_some() {
                return false;
            }
            current = next;
        }
        false
    }

    fn pawn_move_legal(&self, player: Player, mv: Move) -> bool {
        let forward = player.pawn_forward();
        let d_row = mv.to.row - mv.from.row;
        let d_col = mv.to.col - mv.from.col;
        let target_empty = self.board.get(mv.to).is_none();

        if d_row == 0 && d_col == forward {
            target_empty
        } else if d_row == 0 && d_col == 2 * forward && mv.from.col == player.pawn_start_col() {
            target_empty && self.path_clear(mv)
        } else if d_row.abs() == 1 && d_col == forward {
            // own pieces were rejected earlier, so any occupant is an enemy
            !target_empty
        } else {
            false
        }
    }
}

impl MoveOracle for StandardRules {
    fn is_legal_move(&self, player: Player, mv: Move) -> bool {
        if !mv.from.on_board() || !mv.to.on_board() || mv.from == mv.to {
            return false;
        }

        let piece = match self.board.get(mv.from) {
            Some(p) if p.owner == player => p,
            _ => return false,
        };

        if self.board.get(mv.to).is_some_and(|target| target.owner == player) {
            return false;
        }

        let d_row = (mv.to.row - mv.from.row).abs();
        let d_col = (mv.to.col - mv.from.col).abs();
        let straight = d_row == 0 || d_col == 0;
        let diagonal = d_row == d_col;

        match piece.kind {
            PieceKind::King => d_row <= 1 && d_col <= 1,
            PieceKind::Knight => matches!((d_row, d_col), (1, 2) | (2, 1)),
            PieceKind::Bishop => diagonal && self.path_clear(mv),
            PieceKind::Rook => straight && self.path_clear(mv),
            PieceKind::Queen => (straight || diagonal) && self.path_clear(mv),
            PieceKind::Pawn => self.pawn_move_legal(player, mv),
        }
    }
}

impl GameBoard for StandardRules {
    fn snapshot(&self) -> Board {
        self.board
    }
}
