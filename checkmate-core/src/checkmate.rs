//! Checkmate search
//!
//! Once the king is known to be in check, the search builds the candidate
//! moves that could lift it, in a fixed order:
//!
//! 1. king steps to each neighbouring square
//! 2. moves onto either diagonal through the king (diagonal check only)
//! 3. moves onto the king's column / row (rook or queen check only)
//! 4. captures of a checking knight, pawn or king
//!
//! Each candidate is put to the oracle and, when approved, replayed on a copy
//! of the board. The first move that leaves the king safe refutes the mate.

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::attacks::{Geometry, Threats};
use crate::board::{Board, Move, Square, BOARD_SIZE, KING_OFFSETS};
use crate::check::{is_check_after_move, threats};
use crate::error::CheckError;
use crate::oracle::{GameBoard, MoveOracle};
use crate::pieces::Player;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Search configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MateSearchConfig {
    /// Evaluate candidate moves on the rayon thread pool
    pub parallel: bool,
    /// Try capturing a checking knight, pawn or king
    pub capture_leapers: bool,
}

impl Default for MateSearchConfig {
    fn default() -> Self {
        Self {
            parallel: false,
            capture_leapers: true,
        }
    }
}

impl MateSearchConfig {
    /// Create config running on the rayon pool
    pub fn parallel() -> Self {
        Self {
            parallel: true,
            ..Default::default()
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_leaper_captures(mut self, capture_leapers: bool) -> Self {
        self.capture_leapers = capture_leapers;
        self
    }
}

// ============================================================================
// RESULTS
// ============================================================================

/// How an escape lifts the check
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscapeKind {
    KingStep,
    DiagonalBlock,
    LineBlock,
    Capture,
}

/// A move that leaves the king out of check
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Escape {
    pub kind: EscapeKind,
    pub mv: Move,
}

/// Outcome of a checkmate search
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    NotInCheck,
    Escapable(Escape),
    Checkmate,
}

impl Verdict {
    pub fn is_checkmate(self) -> bool {
        self == Verdict::Checkmate
    }

    pub fn escape(self) -> Option<Escape> {
        match self {
            Verdict::Escapable(escape) => Some(escape),
            _ => None,
        }
    }
}

// ============================================================================
// SEARCH
// ============================================================================

/// Checkmate search with a fixed configuration
#[derive(Clone, Debug, Default)]
pub struct MateSearch {
    config: MateSearchConfig,
}

impl MateSearch {
    pub fn new(config: MateSearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MateSearchConfig {
        &self.config
    }

    /// Decide whether `player` is checkmated, reporting the first escape found
    pub fn evaluate<O>(&self, board: &Board, player: Player, oracle: &O) -> Result<Verdict, CheckError>
    where
        O: MoveOracle + Sync,
    {
        let (king, threats) = threats(board, player)?;
        if threats.is_empty() {
            tracing::debug!(%player, "king not in check");
            return Ok(Verdict::NotInCheck);
        }

        let candidates = self.candidates(board, king, player, threats);
        tracing::debug!(
            %player,
            king = %king,
            threats = ?threats.iter().collect::<Vec<_>>(),
            candidates = candidates.len(),
            "searching for an escape"
        );

        let escape = if self.config.parallel {
            first_escape_parallel(board, player, oracle, &candidates)?
        } else {
            first_escape(board, player, oracle, &candidates)?
        };

        Ok(match escape {
            Some(escape) => {
                tracing::debug!(kind = ?escape.kind, mv = %escape.mv, "escape found");
                Verdict::Escapable(escape)
            }
            None => {
                tracing::debug!(%player, "checkmate");
                Verdict::Checkmate
            }
        })
    }

    /// Candidate moves in search order, without duplicates
    fn candidates(&self, board: &Board, king: Square, player: Player, threats: Threats) -> Vec<Escape> {
        let mut list = CandidateList::new(board, king, player);

        for (d_row, d_col) in KING_OFFSETS {
            if let Some(dest) = king.offset(d_row, d_col) {
                list.push(EscapeKind::KingStep, Move::new(king, dest));
            }
        }

        if threats.contains(Geometry::Diagonal) {
            for diagonal in [(1, 1), (-1, 1)] {
                for space in -BOARD_SIZE..BOARD_SIZE {
                    if let Some(dest) = king.offset(diagonal.0 * space, diagonal.1 * space) {
                        list.push_all_sources(EscapeKind::DiagonalBlock, dest);
                    }
                }
            }
        }

        if threats.contains(Geometry::Horizontal) {
            for row in 0..BOARD_SIZE {
                list.push_all_sources(EscapeKind::LineBlock, Square::new(row, king.col));
            }
        }

        if threats.contains(Geometry::Vertical) {
            for col in 0..BOARD_SIZE {
                list.push_all_sources(EscapeKind::LineBlock, Square::new(king.row, col));
            }
        }

        if self.config.capture_leapers {
            for geometry in threats.iter().filter(|g| !g.is_line()) {
                for attacker in geometry.attackers(board, king, player) {
                    list.push_all_sources(EscapeKind::Capture, attacker);
                }
            }
        }

        list.moves
    }
}

/// Collects candidate moves, skipping repeats, null moves and moves onto the
/// king's own square
struct CandidateList {
    king: Square,
    sources: Vec<Square>,
    seen: FxHashSet<Move>,
    moves: Vec<Escape>,
}

impl CandidateList {
    fn new(board: &Board, king: Square, player: Player) -> Self {
        Self {
            king,
            sources: board.squares_of(player).collect(),
            seen: FxHashSet::default(),
            moves: Vec::new(),
        }
    }

    fn push(&mut self, kind: EscapeKind, mv: Move) {
        if mv.from == mv.to || mv.to == self.king {
            return;
        }
        if self.seen.insert(mv) {
            self.moves.push(Escape { kind, mv });
        }
    }

    fn push_all_sources(&mut self, kind: EscapeKind, dest: Square) {
        for i in 0..self.sources.len() {
            let from = self.sources[i];
            self.push(kind, Move::new(from, dest));
        }
    }
}

/// Does `mv` pass the oracle and leave the king safe
fn lifts_check<O>(board: &Board, player: Player, oracle: &O, mv: Move) -> Result<bool, CheckError>
where
    O: MoveOracle + ?Sized,
{
    if !oracle.is_legal_move(player, mv) {
        return Ok(false);
    }
    Ok(!is_check_after_move(board, player, mv)?)
}

fn first_escape<O>(board: &Board, player: Player, oracle: &O, candidates: &[Escape]) -> Result<Option<Escape>, CheckError>
where
    O: MoveOracle,
{
    for &candidate in candidates {
        if lifts_check(board, player, oracle, candidate.mv)? {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// Same result as `first_escape`: `find_first` keeps candidate order
fn first_escape_parallel<O>(
    board: &Board,
    player: Player,
    oracle: &O,
    candidates: &[Escape],
) -> Result<Option<Escape>, CheckError>
where
    O: MoveOracle + Sync,
{
    let found = candidates
        .par_iter()
        .map(|&candidate| {
            lifts_check(board, player, oracle, candidate.mv).map(|lifted| lifted.then_some(candidate))
        })
        .find_first(|outcome| !matches!(outcome, Ok(None)));

    match found {
        Some(outcome) => outcome,
        None => Ok(None),
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Is `player` checkmated on `board`, with `oracle` judging move legality
pub fn is_checkmate<O>(board: &Board, player: Player, oracle: &O) -> Result<bool, CheckError>
where
    O: MoveOracle + Sync,
{
    Ok(MateSearch::default().evaluate(board, player, oracle)?.is_checkmate())
}

/// Is `player` checkmated on the wrapper's current board
pub fn is_checkmate_on<G>(game: &G, player: Player) -> Result<bool, CheckError>
where
    G: GameBoard + Sync,
{
    let board = game.snapshot();
    is_checkmate(&board, player, game)
}

/// First escaping move, if `player` is in check and can get out of it
pub fn find_escape<O>(board: &Board, player: Player, oracle: &O) -> Result<Option<Escape>, CheckError>
where
    O: MoveOracle + Sync,
{
    Ok(MateSearch::default().evaluate(board, player, oracle)?.escape())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::is_check_static;
    use crate::rules::StandardRules;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn rules(diagram: &str) -> StandardRules {
        StandardRules::new(diagram.parse().unwrap())
    }

    /// Oracle counting how often it is consulted
    struct CountingOracle<'a> {
        inner: &'a StandardRules,
        calls: AtomicUsize,
    }

    impl MoveOracle for CountingOracle<'_> {
        fn is_legal_move(&self, player: Player, mv: Move) -> bool {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.inner.is_legal_move(player, mv)
        }
    }

    fn back_rank() -> StandardRules {
        rules(
            "
            K......r
            PP......
            ........
            ........
            ........
            ........
            ........
            .......k
            ",
        )
    }

    fn smothered(pawn_guard: bool) -> StandardRules {
        let guard = if pawn_guard { 'P' } else { 'R' };
        rules(&format!(
            "
            KR......
            {}P......
            .n......
            ........
            ........
            ........
            ........
            .......k
            ",
            guard
        ))
    }

    #[test]
    fn test_back_rank_mate() {
        let game = back_rank();
        assert_eq!(is_checkmate_on(&game, Player::White), Ok(true));
        assert_eq!(find_escape(game.board(), Player::White, &game), Ok(None));
    }

    #[test]
    fn test_king_steps_away_from_queen() {
        let game = rules(
            "
            ........
            ........
            ........
            ...K....
            ........
            .....q..
            ........
            k.......
            ",
        );
        let escape = find_escape(game.board(), Player::White, &game).unwrap().unwrap();
        assert_eq!(escape.kind, EscapeKind::KingStep);
        assert_eq!(escape.mv, Move::from_coords(3, 3, 2, 3));
        assert_eq!(is_checkmate_on(&game, Player::White), Ok(false));
    }

    #[test]
    fn test_interpose_on_file() {
        let game = rules(
            "
            ...BKB..
            ...R.R..
            ........
            ........
            ........
            ..N.....
            ....r...
            k.......
            ",
        );
        let board = game.snapshot();
        assert_eq!(is_check_static(&board, Player::White), Ok(true));

        let escape = find_escape(&board, Player::White, &game).unwrap().unwrap();
        assert_eq!(escape.kind, EscapeKind::LineBlock);
        assert_eq!(escape.mv.to.col, 4);
        assert_eq!(is_check_after_move(&board, Player::White, escape.mv), Ok(false));
    }

    #[test]
    fn test_smothered_knight_mate() {
        let game = smothered(false);
        assert_eq!(is_checkmate_on(&game, Player::White), Ok(true));
    }

    #[test]
    fn test_capture_checking_knight() {
        let game = smothered(true);
        let escape = find_escape(game.board(), Player::White, &game).unwrap().unwrap();
        assert_eq!(escape.kind, EscapeKind::Capture);
        assert_eq!(escape.mv, Move::from_coords(1, 0, 2, 1));

        // without leaper captures only lines are searched
        let search = MateSearch::new(MateSearchConfig::default().with_leaper_captures(false));
        assert_eq!(search.evaluate(game.board(), Player::White, &game), Ok(Verdict::Checkmate));
    }

    #[test]
    fn test_no_check_skips_search() {
        let game = rules(
            "
            K.......
            ........
            ........
            ........
            ........
            ........
            ........
            .......k
            ",
        );
        let oracle = CountingOracle { inner: &game, calls: AtomicUsize::new(0) };
        let verdict = MateSearch::default().evaluate(game.board(), Player::White, &oracle);
        assert_eq!(verdict, Ok(Verdict::NotInCheck));
        assert_eq!(oracle.calls.load(Ordering::Relaxed), 0);
        assert_eq!(is_checkmate_on(&game, Player::Black), Ok(false));
    }

    #[test]
    fn test_stub_oracle_rejecting_everything() {
        let game = rules(
            "
            ........
            ........
            ........
            ...K....
            ........
            .....q..
            ........
            k.......
            ",
        );
        let never = |_: Player, _: Move| false;
        assert_eq!(is_checkmate(game.board(), Player::White, &never), Ok(true));
    }

    #[test]
    fn test_missing_king_is_reported() {
        let board: Board = "
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            .......k
        "
        .parse()
        .unwrap();
        let always = |_: Player, _: Move| true;
        assert_eq!(
            is_checkmate(&board, Player::White, &always),
            Err(CheckError::KingNotFound(Player::White))
        );
    }

    #[test]
    fn test_candidates_are_unique() {
        let game = rules(
            "
            q...K...
            ........
            ..B.....
            ........
            ....r...
            ........
            ........
            k.......
            ",
        );
        let board = game.snapshot();
        let (king, threats) = threats(&board, Player::White).unwrap();
        assert!(threats.contains(Geometry::Vertical));
        assert!(threats.contains(Geometry::Horizontal));

        let candidates = MateSearch::default().candidates(&board, king, Player::White, threats);
        let unique: FxHashSet<Move> = candidates.iter().map(|c| c.mv).collect();
        assert_eq!(unique.len(), candidates.len());
        assert!(candidates.iter().all(|c| c.mv.to != king && c.mv.from != c.mv.to));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let positions = [back_rank(), smothered(false), smothered(true)];
        let sequential = MateSearch::default();
        let parallel = MateSearch::new(MateSearchConfig::parallel());

        for game in &positions {
            let board = game.snapshot();
            assert_eq!(
                sequential.evaluate(&board, Player::White, game),
                parallel.evaluate(&board, Player::White, game)
            );
        }
    }
}
