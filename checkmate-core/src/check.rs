//! King location and check evaluation

use crate::attacks::{threats_to, Threats, GEOMETRIES};
use crate::board::{Board, Move, Square};
use crate::error::CheckError;
use crate::pieces::{Piece, PieceKind, Player};

/// Locate `player`'s king (first match in row-major order)
pub fn locate_king(board: &Board, player: Player) -> Result<Square, CheckError> {
    let king = Piece::new(PieceKind::King, player);
    board
        .pieces()
        .find(|&(_, piece)| piece == king)
        .map(|(sq, _)| sq)
        .ok_or(CheckError::KingNotFound(player))
}

/// Is `player`'s king in check on this board
pub fn is_check_static(board: &Board, player: Player) -> Result<bool, CheckError> {
    let king = locate_king(board, player)?;
    Ok(king_attacked(board, king, player))
}

/// Is `player`'s king in check after relocating `mv.from` onto `mv.to`.
///
/// The move is applied unconditionally on a copy; legality is not checked
/// here. The king is located again since it may be the piece that moved.
pub fn is_check_after_move(board: &Board, player: Player, mv: Move) -> Result<bool, CheckError> {
    let after = board.with_move(mv);
    is_check_static(&after, player)
}

/// King square plus every geometry giving check
pub fn threats(board: &Board, player: Player) -> Result<(Square, Threats), CheckError> {
    let king = locate_king(board, player)?;
    Ok((king, threats_to(board, king, player)))
}

fn king_attacked(board: &Board, king: Square, player: Player) -> bool {
    GEOMETRIES
        .iter()
        .any(|geometry| geometry.attacks(board, king, player))
}
