//! Move legality capability consumed by the checkmate search

use crate::board::{Board, Move};
use crate::pieces::Player;

/// Decides whether a move is structurally legal for a player.
///
/// Structural legality means the piece movement rules only; whether the move
/// leaves the mover in check is decided by the check evaluator.
///
/// Precondition: an oracle must only approve moves whose source square holds
/// one of `player`'s pieces. The search trusts the verdict and does not check
/// source occupancy again.
pub trait MoveOracle {
    fn is_legal_move(&self, player: Player, mv: Move) -> bool;
}

impl<F> MoveOracle for F
where
    F: Fn(Player, Move) -> bool,
{
    fn is_legal_move(&self, player: Player, mv: Move) -> bool {
        self(player, mv)
    }
}

/// A board wrapper exposing a snapshot alongside its legality oracle
pub trait GameBoard: MoveOracle {
    fn snapshot(&self) -> Board;
}
