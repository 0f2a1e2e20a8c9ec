//! Attack geometry
//!
//! One predicate per threat category. Each answers whether the king of
//! `player` standing on `king` is attacked through that geometry by the
//! opponent's pieces, and has an `*_attackers` form listing the squares the
//! attacks come from. All of them are pure functions of the board.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Square, BOARD_SIZE, DIAGONAL_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS};
use crate::pieces::{PieceKind, Player};

/// Threat category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Geometry {
    /// Bishop or queen along a diagonal
    Diagonal,
    /// Rook or queen sharing the king's column (row varies)
    Horizontal,
    /// Rook or queen sharing the king's row (column varies)
    Vertical,
    /// Adjacent enemy king
    King,
    /// Enemy pawn capture
    Pawn,
    /// Enemy knight leap
    Knight,
}

/// Geometries in evaluation order
pub const GEOMETRIES: [Geometry; 6] = [
    Geometry::Diagonal,
    Geometry::Horizontal,
    Geometry::Vertical,
    Geometry::King,
    Geometry::Pawn,
    Geometry::Knight,
];

impl Geometry {
    const fn bit(self) -> u8 {
        1 << self as u8
    }

    /// Attack can be blocked by interposing a piece
    pub fn is_line(self) -> bool {
        matches!(self, Geometry::Diagonal | Geometry::Horizontal | Geometry::Vertical)
    }

    /// Is the king attacked through this geometry
    pub fn attacks(self, board: &Board, king: Square, player: Player) -> bool {
        match self {
            Geometry::Diagonal => diagonal(board, king, player),
            Geometry::Horizontal => horizontal(board, king, player),
            Geometry::Vertical => vertical(board, king, player),
            Geometry::King => king_adjacent(board, king, player),
            Geometry::Pawn => pawn(board, king, player),
            Geometry::Knight => knight(board, king, player),
        }
    }

    /// Squares attacking the king through this geometry
    pub fn attackers(self, board: &Board, king: Square, player: Player) -> Vec<Square> {
        match self {
            Geometry::Diagonal => diagonal_attackers(board, king, player).collect(),
            Geometry::Horizontal => horizontal_attackers(board, king, player).collect(),
            Geometry::Vertical => vertical_attackers(board, king, player).collect(),
            Geometry::King => king_attackers(board, king, player).collect(),
            Geometry::Pawn => pawn_attackers(board, king, player).collect(),
            Geometry::Knight => knight_attackers(board, king, player).collect(),
        }
    }
}

/// Set of geometries giving check
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Threats(u8);

impl Threats {
    pub fn insert(&mut self, geometry: Geometry) {
        self.0 |= geometry.bit();
    }

    pub fn contains(self, geometry: Geometry) -> bool {
        self.0 & geometry.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Geometries present, in evaluation order
    pub fn iter(self) -> impl Iterator<Item = Geometry> {
        GEOMETRIES.into_iter().filter(move |&g| self.contains(g))
    }
}

/// Every geometry currently attacking the king on `king`
pub fn threats_to(board: &Board, king: Square, player: Player) -> Threats {
    let mut threats = Threats::default();
    for geometry in GEOMETRIES {
        if geometry.attacks(board, king, player) {
            threats.insert(geometry);
        }
    }
    threats
}

// ============================================================================
// PREDICATES
// ============================================================================

pub fn diagonal(board: &Board, king: Square, player: Player) -> bool {
    diagonal_attackers(board, king, player).next().is_some()
}

pub fn horizontal(board: &Board, king: Square, player: Player) -> bool {
    horizontal_attackers(board, king, player).next().is_some()
}

pub fn vertical(board: &Board, king: Square, player: Player) -> bool {
    vertical_attackers(board, king, player).next().is_some()
}

pub fn king_adjacent(board: &Board, king: Square, player: Player) -> bool {
    king_attackers(board, king, player).next().is_some()
}

pub fn pawn(board: &Board, king: Square, player: Player) -> bool {
    pawn_attackers(board, king, player).next().is_some()
}

pub fn knight(board: &Board, king: Square, player: Player) -> bool {
    knight_attackers(board, king, player).next().is_some()
}

// ============================================================================
// ATTACKER ENUMERATION
// ============================================================================

/// Bishops and queens seeing the king along the four diagonal rays
pub fn diagonal_attackers(board: &Board, king: Square, player: Player) -> impl Iterator<Item = Square> + '_ {
    DIAGONAL_DIRECTIONS
        .into_iter()
        .filter_map(move |(d_row, d_col)| first_occupied(board, king, d_row, d_col))
        .filter(move |&sq| is_enemy(board, sq, player, PieceKind::slides_diagonally))
}

/// Rooks and queens in the king's column with nothing in between
pub fn horizontal_attackers(board: &Board, king: Square, player: Player) -> impl Iterator<Item = Square> + '_ {
    (0..BOARD_SIZE)
        .map(move |row| Square::new(row, king.col))
        .filter(move |&sq| is_enemy(board, sq, player, PieceKind::slides_straight))
        .filter(move |&sq| blockers_between(board, sq, king) == 0)
}

/// Rooks and queens in the king's row with nothing in between
pub fn vertical_attackers(board: &Board, king: Square, player: Player) -> impl Iterator<Item = Square> + '_ {
    (0..BOARD_SIZE)
        .map(move |col| Square::new(king.row, col))
        .filter(move |&sq| is_enemy(board, sq, player, PieceKind::slides_straight))
        .filter(move |&sq| blockers_between(board, sq, king) == 0)
}

pub fn king_attackers(board: &Board, king: Square, player: Player) -> impl Iterator<Item = Square> + '_ {
    leaper_attackers(board, king, player, &KING_OFFSETS, PieceKind::King)
}

/// Enemy pawns one column behind the king (from the pawn's point of view
/// the king sits diagonally forward)
pub fn pawn_attackers(board: &Board, king: Square, player: Player) -> impl Iterator<Item = Square> + '_ {
    let back = -player.opponent().pawn_forward();
    [(-1, back), (1, back)]
        .into_iter()
        .filter_map(move |(d_row, d_col)| king.offset(d_row, d_col))
        .filter(move |&sq| is_enemy(board, sq, player, |kind| kind == PieceKind::Pawn))
}

pub fn knight_attackers(board: &Board, king: Square, player: Player) -> impl Iterator<Item = Square> + '_ {
    leaper_attackers(board, king, player, &KNIGHT_OFFSETS, PieceKind::Knight)
}

// ============================================================================
// HELPERS
// ============================================================================

fn leaper_attackers<'a>(
    board: &'a Board,
    king: Square,
    player: Player,
    offsets: &'static [(i8, i8)],
    kind: PieceKind,
) -> impl Iterator<Item = Square> + 'a {
    offsets
        .iter()
        .filter_map(move |&(d_row, d_col)| king.offset(d_row, d_col))
        .filter(move |&sq| is_enemy(board, sq, player, |k| k == kind))
}

/// Does `sq` hold an opponent piece whose kind satisfies `pred`
fn is_enemy(board: &Board, sq: Square, player: Player, pred: impl Fn(PieceKind) -> bool) -> bool {
    board
        .get(sq)
        .is_some_and(|piece| piece.owner != player && pred(piece.kind))
}

/// First occupied square walking from `from` in direction (d_row, d_col)
fn first_occupied(board: &Board, from: Square, d_row: i8, d_col: i8) -> Option<Square> {
    let mut current = from;
    while let Some(next) = current.offset(d_row, d_col) {
        if board.get(next).is_some() {
            return Some(next);
        }
        current = next;
    }
    None
}

/// Occupied squares strictly between two squares sharing a row or column
fn blockers_between(board: &Board, a: Square, b: Square) -> usize {
    if a.row == b.row {
        let (lo, hi) = (a.col.min(b.col), a.col.max(b.col));
        (lo + 1..hi)
            .filter(|&col| board.get(Square::new(a.row, col)).is_some())
            .count()
    } else {
        let (lo, hi) = (a.row.min(b.row), a.row.max(b.row));
        (lo + 1..hi)
            .filter(|&row| board.get(Square::new(row, a.col)).is_some())
            .count()
    }
}
