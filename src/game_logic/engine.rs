use std::num::NonZeroU32;

use shakmaty::Setup;
use shakmaty::fen::{Fen, LossyFenError};

use super::config::EngineConfig;
use super::movegen::pseudo_legal_moves;
use super::moves::Move;
use crate::game_state::{Board, Color, FenError, Piece, PieceKind, Square};

/// Terminal classification of the position, as of the last
/// [`GameEngine::get_valid_moves`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is in check with no legal moves.
    Checkmate { loser: Color },
    /// The side to move is not in check and has no legal moves.
    Stalemate,
}

/// Core rules engine holding the live game.
///
/// The engine is mutated in place by [`make_move`](Self::make_move) and
/// [`undo_move`](Self::undo_move); legality testing temporarily plays each
/// candidate on the live board and takes it back, so the two must stay
/// exact inverses.
#[derive(Clone)]
pub struct GameEngine {
    board: Board,
    side_to_move: Color,
    move_log: Vec<Move>,

    /// Cached king squares. The board is the source of truth; these are
    /// updated on every king move and every undo of one.
    white_king: Square,
    black_king: Square,

    checkmate: bool,
    stalemate: bool,

    /// FEN fullmove number, advanced after each black move.
    fullmoves: u32,

    config: EngineConfig,
}

impl GameEngine {
    /// Standard starting position, white to move.
    #[inline]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            board: Board::starting_position(),
            side_to_move: Color::White,
            move_log: Vec::new(),
            white_king: Square::E1,
            black_king: Square::E8,
            checkmate: false,
            stalemate: false,
            fullmoves: 1,
            config,
        }
    }

    /// Creates an engine from a FEN string.
    ///
    /// Piece placement, side to move and the fullmove number are read;
    /// castling rights, en passant square and the halfmove clock are
    /// ignored. Each side must have exactly one king.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Self::from_fen_with_config(fen, EngineConfig::default())
    }

    pub fn from_fen_with_config(fen: &str, config: EngineConfig) -> Result<Self, FenError> {
        let setup = fen.parse::<Fen>()?.into_setup();
        let board = Board::from(&setup.board);

        Ok(Self {
            white_king: single_king(&board, Color::White)?,
            black_king: single_king(&board, Color::Black)?,
            board,
            side_to_move: setup.turn.into(),
            move_log: Vec::new(),
            checkmate: false,
            stalemate: false,
            fullmoves: setup.fullmoves.get(),
            config,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get the piece at a given square, if any
    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn white_to_move(&self) -> bool {
        self.side_to_move == Color::White
    }

    /// Moves played so far, oldest first.
    #[inline]
    pub fn move_log(&self) -> &[Move] {
        &self.move_log
    }

    /// Cached square of `color`'s king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    #[inline]
    pub fn checkmate(&self) -> bool {
        self.checkmate
    }

    #[inline]
    pub fn stalemate(&self) -> bool {
        self.stalemate
    }

    pub fn status(&self) -> GameStatus {
        if self.checkmate {
            GameStatus::Checkmate {
                loser: self.side_to_move,
            }
        } else if self.stalemate {
            GameStatus::Stalemate
        } else {
            GameStatus::Ongoing
        }
    }

    /// Play `mv` on the board and hand the turn to the other side.
    ///
    /// No legality check is made; callers check membership in
    /// [`get_valid_moves`](Self::get_valid_moves) first.
    pub fn make_move(&mut self, mv: Move) {
        self.apply(mv);
        log::debug!(
            "{} played {} ({} -> {})",
            !self.side_to_move,
            mv,
            mv.start(),
            mv.end()
        );
    }

    /// Take back the most recent move. Does nothing on an empty log.
    pub fn undo_move(&mut self) -> Option<Move> {
        let mv = self.revert()?;
        log::debug!("undid {mv}, {} to move", self.side_to_move);
        Some(mv)
    }

    /// Moves for the side to move that ignore check.
    pub fn pseudo_legal_moves(&self) -> Vec<Move> {
        pseudo_legal_moves(&self.board, self.side_to_move)
    }

    /// Whether the side not to move attacks `square`.
    pub fn square_under_attack(&self, square: Square) -> bool {
        self.config
            .check_detection
            .is_attacked(&self.board, square, !self.side_to_move)
    }

    /// Whether the side to move has its king attacked.
    pub fn in_check(&self) -> bool {
        self.square_under_attack(self.king_square(self.side_to_move))
    }

    /// All legal moves for the side to move; refreshes the checkmate and
    /// stalemate flags.
    ///
    /// Each pseudo-legal candidate is played on the live board, the mover's
    /// king is tested, and the move is taken back. Candidates are visited
    /// last to first so removal does not disturb the ones not yet visited.
    pub fn get_valid_moves(&mut self) -> Vec<Move> {
        let mut moves = self.pseudo_legal_moves();

        for i in (0..moves.len()).rev() {
            let mv = moves[i];
            self.apply(mv);
            self.side_to_move = !self.side_to_move;
            let exposes_king = self.in_check();
            self.side_to_move = !self.side_to_move;
            self.revert();

            if exposes_king {
                log::trace!("discarding {mv}: leaves own king attacked");
                moves.remove(i);
            }
        }

        if moves.is_empty() {
            if self.in_check() {
                self.checkmate = true;
                self.stalemate = false;
                log::debug!("checkmate, {} loses", self.side_to_move);
            } else {
                self.checkmate = false;
                self.stalemate = true;
                log::debug!("stalemate, {} has no moves", self.side_to_move);
            }
        } else {
            self.checkmate = false;
            self.stalemate = false;
        }

        moves
    }

    /// The legal move from `from` to `to`, if there is one.
    pub fn find_valid_move(&mut self, from: Square, to: Square) -> Option<Move> {
        let candidate = Move::new(from, to, &self.board);
        self.get_valid_moves()
            .into_iter()
            .find(|mv| *mv == candidate)
    }

    /// FEN for the current position. Castling and en passant are always
    /// `-` since neither is supported, and the halfmove clock is always 0.
    pub fn to_fen(&self) -> String {
        let mut setup = Setup::empty();
        setup.board = shakmaty::Board::from(&self.board);
        setup.turn = self.side_to_move.into();
        setup.fullmoves = NonZeroU32::new(self.fullmoves).unwrap_or(NonZeroU32::MIN);
        Fen::try_from_setup(setup)
            .unwrap_or_else(LossyFenError::ignore)
            .to_string()
    }

    fn apply(&mut self, mv: Move) {
        self.board.set_piece(mv.start(), None);
        self.board.set_piece(mv.end(), mv.piece_moved());
        self.move_log.push(mv);
        if self.side_to_move == Color::Black {
            self.fullmoves = self.fullmoves.saturating_add(1);
        }
        self.side_to_move = !self.side_to_move;
        self.track_king(mv, mv.end());
    }

    fn revert(&mut self) -> Option<Move> {
        let mv = self.move_log.pop()?;
        self.board.set_piece(mv.start(), mv.piece_moved());
        self.board.set_piece(mv.end(), mv.piece_captured());
        self.side_to_move = !self.side_to_move;
        if self.side_to_move == Color::Black {
            self.fullmoves = self.fullmoves.saturating_sub(1);
        }
        self.track_king(mv, mv.start());
        Some(mv)
    }

    fn track_king(&mut self, mv: Move, square: Square) {
        if let Some(Piece {
            kind: PieceKind::King,
            color,
        }) = mv.piece_moved()
        {
            match color {
                Color::White => self.white_king = square,
                Color::Black => self.black_king = square,
            }
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("position", &self.to_fen())
            .field("white_king", &format_args!("{}", self.white_king))
            .field("black_king", &format_args!("{}", self.black_king))
            .field("status", &self.status())
            .finish()
    }
}

/// The square of `color`'s only king, or an error if there isn't exactly one.
fn single_king(board: &Board, color: Color) -> Result<Square, FenError> {
    let king = Piece::new(color, PieceKind::King);
    let squares: Vec<Square> = board
        .pieces()
        .filter(|(_, piece)| *piece == king)
        .map(|(square, _)| square)
        .collect();
    match squares.as_slice() {
        [square] => Ok(*square),
        _ => Err(FenError::KingCount(color, squares.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::CheckDetection;
    use test_case::test_case;

    fn sq(s: &str) -> Square {
        s.parse().expect("test square should be valid")
    }

    fn play(engine: &mut GameEngine, from: &str, to: &str) -> Move {
        let mv = engine
            .find_valid_move(sq(from), sq(to))
            .unwrap_or_else(|| panic!("{from}{to} should be legal in {engine:?}"));
        engine.make_move(mv);
        mv
    }

    #[test]
    fn test_new_game() {
        let engine = GameEngine::new();

        assert!(engine.white_to_move());
        assert!(engine.move_log().is_empty());
        assert_eq!(engine.king_square(Color::White), sq("e1"));
        assert_eq!(engine.king_square(Color::Black), sq("e8"));
        assert!(!engine.checkmate());
        assert!(!engine.stalemate());
        assert_eq!(engine.status(), GameStatus::Ongoing);
    }

    #[test]
    fn test_undo_on_empty_log_is_noop() {
        let mut engine = GameEngine::new();
        let before = *engine.board();

        assert_eq!(engine.undo_move(), None);
        assert_eq!(*engine.board(), before);
        assert!(engine.white_to_move());
    }

    #[test]
    fn test_king_move_updates_cached_square() {
        let mut engine = GameEngine::new();
        play(&mut engine, "e2", "e4");
        play(&mut engine, "e7", "e5");
        play(&mut engine, "e1", "e2");

        assert_eq!(engine.king_square(Color::White), sq("e2"));
        assert_eq!(engine.board().find_king(Color::White), Some(sq("e2")));

        engine.undo_move();
        assert_eq!(engine.king_square(Color::White), sq("e1"));
        assert_eq!(engine.board().find_king(Color::White), Some(sq("e1")));
    }

    #[test]
    fn test_king_cannot_step_into_attack_after_moving() {
        // Once the king has moved, check detection must follow it.
        let mut engine = GameEngine::from_fen("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1").unwrap();
        play(&mut engine, "e1", "f1");
        play(&mut engine, "d2", "d1");

        assert!(engine.in_check());
        let moves = engine.get_valid_moves();
        assert!(moves.iter().all(|mv| mv.end().row() != 7));
    }

    #[test]
    fn test_multi_step_undo_restores_start() {
        let mut engine = GameEngine::new();
        for (from, to) in [("e2", "e4"), ("d7", "d5"), ("e4", "d5"), ("d8", "d5")] {
            play(&mut engine, from, to);
        }
        assert_eq!(engine.move_log().len(), 4);

        while engine.undo_move().is_some() {}

        assert_eq!(*engine.board(), Board::starting_position());
        assert!(engine.white_to_move());
    }

    #[test]
    fn test_capture_is_restored_on_undo() {
        let mut engine = GameEngine::new();
        play(&mut engine, "e2", "e4");
        play(&mut engine, "d7", "d5");
        let capture = play(&mut engine, "e4", "d5");

        assert!(capture.is_capture());
        assert_eq!(capture.notation(), "exd5");

        engine.undo_move();
        assert_eq!(
            engine.piece_at(sq("d5")),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
        assert_eq!(
            engine.piece_at(sq("e4")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn test_pinned_piece_cannot_leave_line() {
        // White knight on e2 is pinned by the rook on e8.
        let mut engine = GameEngine::from_fen("k3r3/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let moves = engine.get_valid_moves();

        assert!(moves.iter().all(|mv| mv.start() != sq("e2")));
        assert!(!moves.is_empty());
    }

    #[test]
    fn test_get_valid_moves_leaves_state_untouched() {
        let mut engine =
            GameEngine::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w - - 0 1")
                .unwrap();
        let board = *engine.board();

        engine.get_valid_moves();

        assert_eq!(*engine.board(), board);
        assert!(engine.white_to_move());
        assert!(engine.move_log().is_empty());
    }

    #[test_case(CheckDetection::Regenerate; "regenerate")]
    #[test_case(CheckDetection::Geometry; "geometry")]
    fn test_back_rank_mate(check_detection: CheckDetection) {
        let mut engine = GameEngine::from_fen_with_config(
            "3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1",
            check_detection.into(),
        )
        .unwrap();

        assert!(engine.get_valid_moves().is_empty());
        assert!(engine.checkmate());
        assert!(!engine.stalemate());
        assert_eq!(
            engine.status(),
            GameStatus::Checkmate {
                loser: Color::Black
            }
        );
    }

    #[test_case(CheckDetection::Regenerate; "regenerate")]
    #[test_case(CheckDetection::Geometry; "geometry")]
    fn test_stalemate(check_detection: CheckDetection) {
        let mut engine = GameEngine::from_fen_with_config(
            "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
            check_detection.into(),
        )
        .unwrap();

        assert!(engine.get_valid_moves().is_empty());
        assert!(!engine.checkmate());
        assert!(engine.stalemate());
        assert_eq!(engine.status(), GameStatus::Stalemate);
    }

    #[test]
    fn test_flags_cleared_once_moves_exist_again() {
        let mut engine = GameEngine::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            play(&mut engine, from, to);
        }
        assert!(engine.get_valid_moves().is_empty());
        assert!(engine.checkmate());

        engine.undo_move();
        assert!(!engine.get_valid_moves().is_empty());
        assert!(!engine.checkmate());
        assert!(!engine.stalemate());
    }

    #[test]
    fn test_from_fen_errors() {
        assert!(matches!(
            GameEngine::from_fen("4k3/8/8/8/8/8/8/4K3 x").unwrap_err(),
            FenError::Parse(_)
        ));
        assert!(matches!(
            GameEngine::from_fen("4k3/8/8/8/8/8/8/4K03 w - - 0 1").unwrap_err(),
            FenError::Parse(_)
        ));
        assert_eq!(
            GameEngine::from_fen("8/8/8/8/8/8/8/4K3 w").unwrap_err(),
            FenError::KingCount(Color::Black, 0)
        );
        assert_eq!(
            GameEngine::from_fen("4k3/8/8/8/8/8/8/3KK3 w").unwrap_err(),
            FenError::KingCount(Color::White, 2)
        );
    }

    #[test]
    fn test_from_fen_defaults_missing_fields() {
        let engine = GameEngine::from_fen("4k3/8/8/8/8/8/8/4K3").unwrap();
        assert!(engine.white_to_move());
        assert_eq!(engine.to_fen(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }

    #[test]
    fn test_to_fen() {
        let mut engine = GameEngine::new();
        assert_eq!(
            engine.to_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1"
        );

        play(&mut engine, "e2", "e4");
        assert_eq!(
            engine.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b - - 0 1"
        );

        play(&mut engine, "e7", "e5");
        assert_eq!(
            engine.to_fen(),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w - - 0 2"
        );
    }

    #[test]
    fn test_fullmove_number_survives_load_and_undo() {
        let mut engine = GameEngine::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 40").unwrap();
        assert_eq!(engine.to_fen(), "4k3/8/8/8/8/8/8/4K3 b - - 0 40");

        play(&mut engine, "e8", "d8");
        assert_eq!(engine.to_fen(), "3k4/8/8/8/8/8/8/4K3 w - - 0 41");

        play(&mut engine, "e1", "d1");
        assert_eq!(engine.to_fen(), "3k4/8/8/8/8/8/8/3K4 b - - 0 41");

        // Legality testing plays and takes back moves internally.
        engine.get_valid_moves();
        assert_eq!(engine.to_fen(), "3k4/8/8/8/8/8/8/3K4 b - - 0 41");

        engine.undo_move();
        engine.undo_move();
        assert_eq!(engine.to_fen(), "4k3/8/8/8/8/8/8/4K3 b - - 0 40");
    }
}
