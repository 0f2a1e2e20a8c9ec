//! Position - named board stored as JSON

use crate::board::Board;
use crate::error::BoardError;
use crate::pieces::Player;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A named position with the side to move
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub name: String,
    pub to_move: Player,
    /// One diagram line per row, row 0 first
    pub rows: Vec<String>,
}

impl Position {
    pub fn new(name: impl Into<String>, to_move: Player, board: &Board) -> Self {
        Self {
            name: name.into(),
            to_move,
            rows: board.to_string().lines().map(str::to_string).collect(),
        }
    }

    /// Parse the stored diagram
    pub fn board(&self) -> Result<Board, BoardError> {
        self.rows.join("\n").parse()
    }

    /// Load from JSON file (a bare diagram string is accepted for `rows`)
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;

        if let Ok(position) = serde_json::from_str::<Position>(&content) {
            return Ok(position);
        }

        #[derive(Deserialize)]
        struct DiagramPosition {
            name: Option<String>,
            to_move: Player,
            diagram: String,
        }

        let flat: DiagramPosition = serde_json::from_str(&content)?;
        Ok(Position {
            name: flat.name.unwrap_or_else(|| "unnamed".to_string()),
            to_move: flat.to_move,
            rows: flat
                .diagram
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;
    use crate::pieces::{Piece, PieceKind};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("checkmate-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_save_and_load() {
        let board = Board::empty()
            .with_piece(Square::new(0, 0), Piece::new(PieceKind::King, Player::White))
            .with_piece(Square::new(0, 7), Piece::new(PieceKind::Rook, Player::Black))
            .with_piece(Square::new(7, 7), Piece::new(PieceKind::King, Player::Black));
        let position = Position::new("back-rank", Player::White, &board);

        let path = temp_path("roundtrip");
        position.save(&path).unwrap();
        let loaded = Position::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, position);
        assert_eq!(loaded.board().unwrap(), board);
    }

    #[test]
    fn test_load_diagram_format() {
        let path = temp_path("diagram");
        std::fs::write(
            &path,
            r#"{ "to_move": "Black", "diagram": "K.......\n........\n........\n........\n........\n........\n........\n.......k" }"#,
        )
        .unwrap();
        let loaded = Position::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.name, "unnamed");
        assert_eq!(loaded.to_move, Player::Black);
        assert_eq!(loaded.board().unwrap().pieces().count(), 2);
    }

    #[test]
    fn test_bad_rows() {
        let position = Position {
            name: "broken".to_string(),
            to_move: Player::White,
            rows: vec!["K".to_string()],
        };
        assert!(position.board().is_err());
    }
}
