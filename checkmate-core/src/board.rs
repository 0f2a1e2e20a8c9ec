//! Board geometry and storage (8x8 grid, row/column addressing)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::pieces::{Piece, Player};

/// Board dimension (rows and columns)
pub const BOARD_SIZE: i8 = 8;

const CELLS: usize = BOARD_SIZE as usize;

/// Symbol used for an empty cell in diagrams
pub const EMPTY_SYMBOL: char = '.';

/// Square coordinates (row, col)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if this square is on the board
    pub fn on_board(&self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Square shifted by (d_row, d_col), if it stays on the board
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Square> {
        let sq = Square::new(self.row + d_row, self.col + d_col);
        sq.on_board().then_some(sq)
    }

    /// All 64 squares in row-major order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square::new(row, col)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction vectors to the 8 neighbouring squares (d_row, d_col)
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Knight leap offsets (d_row, d_col)
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-1, -2),
    (1, 2),
    (2, 1),
    (-2, 1),
    (-1, 2),
    (2, -1),
    (1, -2),
];

/// Diagonal ray directions
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

/// A piece relocation (from -> to)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Build from the (fromRow, fromCol, toRow, toCol) tuple form
    pub const fn from_coords(from_row: i8, from_col: i8, to_row: i8, to_col: i8) -> Self {
        Self::new(Square::new(from_row, from_col), Square::new(to_row, to_col))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{} -> {},{}",
            self.from.row, self.from.col, self.to.row, self.to.col
        )
    }
}

impl FromStr for Move {
    type Err = String;

    /// Parses `fromRow,fromCol,toRow,toCol`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coords: Vec<i8> = s
            .split(',')
            .map(|part| part.trim().parse::<i8>())
            .collect::<Result<_, _>>()
            .map_err(|e| format!("invalid move '{}': {}", s, e))?;

        match coords.as_slice() {
            &[fr, fc, tr, tc] => Ok(Move::from_coords(fr, fc, tr, tc)),
            _ => Err(format!("invalid move '{}': expected 4 coordinates", s)),
        }
    }
}

/// Board snapshot (copy to derive new positions)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; CELLS]; CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub const fn empty() -> Self {
        Self {
            cells: [[None; CELLS]; CELLS],
        }
    }

    /// Build a board from piece placements
    pub fn from_pieces(pieces: &[(Square, Piece)]) -> Self {
        let mut board = Self::empty();
        for &(sq, piece) in pieces {
            board.set(sq, Some(piece));
        }
        board
    }

    /// Get piece at square (None when empty or off the board)
    pub fn get(&self, sq: Square) -> Option<Piece> {
        if !sq.on_board() {
            return None;
        }
        self.cells[sq.row as usize][sq.col as usize]
    }

    /// True when the square is on the board and holds no piece
    pub fn is_empty(&self, sq: Square) -> bool {
        sq.on_board() && self.get(sq).is_none()
    }

    /// Iterate occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Squares holding one player's pieces
    pub fn squares_of(&self, player: Player) -> impl Iterator<Item = Square> + '_ {
        self.pieces()
            .filter(move |(_, piece)| piece.owner == player)
            .map(|(sq, _)| sq)
    }

    /// New board with `piece` placed on `sq`
    pub fn with_piece(mut self, sq: Square, piece: Piece) -> Self {
        self.set(sq, Some(piece));
        self
    }

    /// New board with `sq` cleared
    pub fn without_piece(mut self, sq: Square) -> Self {
        self.set(sq, None);
        self
    }

    /// New board with the content of `mv.from` moved onto `mv.to`.
    ///
    /// The relocation is unconditional: whatever `mv.to` held is overwritten
    /// (an empty source clears the destination) and `mv.from` ends up empty.
    pub fn with_move(mut self, mv: Move) -> Self {
        let moving = self.get(mv.from);
        self.set(mv.to, moving);
        self.set(mv.from, None);
        self
    }

    fn set(&mut self, sq: Square, piece: Option<Piece>) {
        if sq.on_board() {
            self.cells[sq.row as usize][sq.col as usize] = piece;
        }
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses an 8-line diagram, row 0 first. Whitespace inside a line is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != CELLS {
            return Err(BoardError::RowCount {
                expected: CELLS,
                found: rows.len(),
            });
        }

        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != CELLS {
                return Err(BoardError::RowLength {
                    row,
                    expected: CELLS,
                    found: symbols.len(),
                });
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                if symbol == EMPTY_SYMBOL {
                    continue;
                }
                let piece = Piece::from_symbol(symbol)
                    .ok_or(BoardError::UnknownSymbol { row, col, symbol })?;
                board.set(Square::new(row as i8, col as i8), Some(piece));
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let symbol = cell.map(|p| p.symbol()).unwrap_or(EMPTY_SYMBOL);
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::PieceKind;

    #[test]
    fn test_square_validity() {
        assert!(Square::new(0, 0).on_board());
        assert!(Square::new(7, 7).on_board());
        assert!(!Square::new(8, 0).on_board());
        assert!(!Square::new(0, -1).on_board());
        assert_eq!(Square::new(0, 0).offset(-1, 0), None);
        assert_eq!(Square::new(3, 3).offset(1, -2), Some(Square::new(4, 1)));
    }

    #[test]
    fn test_all_squares() {
        let all: Vec<_> = Square::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0], Square::new(0, 0));
        assert_eq!(all[9], Square::new(1, 1));
    }

    #[test]
    fn test_with_move_leaves_original() {
        let rook = Piece::new(PieceKind::Rook, Player::White);
        let board = Board::empty().with_piece(Square::new(0, 0), rook);
        let moved = board.with_move(Move::from_coords(0, 0, 0, 5));

        assert_eq!(board.get(Square::new(0, 0)), Some(rook));
        assert_eq!(moved.get(Square::new(0, 0)), None);
        assert_eq!(moved.get(Square::new(0, 5)), Some(rook));
    }

    #[test]
    fn test_empty_source_clears_destination() {
        let knight = Piece::new(PieceKind::Knight, Player::Black);
        let board = Board::empty().with_piece(Square::new(4, 4), knight);
        let moved = board.with_move(Move::from_coords(2, 2, 4, 4));
        assert_eq!(moved.get(Square::new(4, 4)), None);
    }

    #[test]
    fn test_diagram_parse() {
        let board: Board = "
            K.......
            ........
            ........
            ........
            ........
            ........
            ........
            r......k
        "
        .parse()
        .unwrap();

        assert_eq!(board.get(Square::new(0, 0)), Some(Piece::new(PieceKind::King, Player::White)));
        assert_eq!(board.get(Square::new(7, 0)), Some(Piece::new(PieceKind::Rook, Player::Black)));
        assert_eq!(board.pieces().count(), 3);
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
    }

    #[test]
    fn test_diagram_errors() {
        assert_eq!(
            "K.......".parse::<Board>(),
            Err(BoardError::RowCount { expected: 8, found: 1 })
        );

        let bad = "K......\n........\n........\n........\n........\n........\n........\n........";
        assert!(matches!(bad.parse::<Board>(), Err(BoardError::RowLength { row: 0, .. })));

        let unknown = "K......x\n........\n........\n........\n........\n........\n........\n........";
        assert_eq!(
            unknown.parse::<Board>(),
            Err(BoardError::UnknownSymbol { row: 0, col: 7, symbol: 'x' })
        );
    }

    #[test]
    fn test_move_parse() {
        assert_eq!("1, 2,3,4".parse::<Move>(), Ok(Move::from_coords(1, 2, 3, 4)));
        assert!("1,2,3".parse::<Move>().is_err());
        assert!("a,b,c,d".parse::<Move>().is_err());
    }
}
