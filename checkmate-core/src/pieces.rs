//! Piece and player definitions

use serde::{Deserialize, Serialize};

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Column step of this player's pawns.
    ///
    /// Pawns advance along the column axis: White towards higher columns,
    /// Black towards lower ones. Pawn captures share the same forward step.
    pub fn pawn_forward(self) -> i8 {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    /// Column a pawn of this player starts on (double step allowed from here)
    pub fn pawn_start_col(self) -> i8 {
        match self {
            Player::White => 1,
            Player::Black => 6,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::White => write!(f, "white"),
            Player::Black => write!(f, "black"),
        }
    }
}

impl std::str::FromStr for Player {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Player::White),
            "black" | "b" => Ok(Player::Black),
            other => Err(format!("unknown player: {}", other)),
        }
    }
}

/// Piece kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// All piece kinds, in symbol order
pub const PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

impl PieceKind {
    /// White symbol; Black uses the lowercase form
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Slides diagonally (bishop, queen)
    pub fn slides_diagonally(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Queen)
    }

    /// Slides along rows and columns (rook, queen)
    pub fn slides_straight(self) -> bool {
        matches!(self, PieceKind::Rook | PieceKind::Queen)
    }
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Player,
}

impl Piece {
    pub const fn new(kind: PieceKind, owner: Player) -> Self {
        Self { kind, owner }
    }

    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }

    pub fn symbol(&self) -> char {
        match self.owner {
            Player::White => self.kind.symbol(),
            Player::Black => self.kind.symbol().to_ascii_lowercase(),
        }
    }

    /// Parse a board symbol (`K`, `q`, ...)
    pub fn from_symbol(c: char) -> Option<Self> {
        let owner = if c.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        let upper = c.to_ascii_uppercase();
        PIECE_KINDS
            .iter()
            .find(|kind| kind.symbol() == upper)
            .map(|&kind| Piece::new(kind, owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_lookup() {
        assert_eq!(Piece::from_symbol('K'), Some(Piece::new(PieceKind::King, Player::White)));
        assert_eq!(Piece::from_symbol('n'), Some(Piece::new(PieceKind::Knight, Player::Black)));
        assert_eq!(Piece::from_symbol('x'), None);
        assert_eq!(Piece::from_symbol('.'), None);
    }

    #[test]
    fn test_symbols_roundtrip() {
        for &kind in &PIECE_KINDS {
            for owner in [Player::White, Player::Black] {
                let piece = Piece::new(kind, owner);
                assert_eq!(Piece::from_symbol(piece.symbol()), Some(piece));
            }
        }
    }

    #[test]
    fn test_pawn_direction() {
        assert_eq!(Player::White.pawn_forward(), 1);
        assert_eq!(Player::Black.pawn_forward(), -1);
        assert_eq!(Player::White.opponent(), Player::Black);
    }

    #[test]
    fn test_player_parse() {
        assert_eq!("White".parse::<Player>(), Ok(Player::White));
        assert_eq!("b".parse::<Player>(), Ok(Player::Black));
        assert!("red".parse::<Player>().is_err());
    }
}
