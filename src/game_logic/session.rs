use thiserror::Error;

use super::engine::GameEngine;
use super::moves::Move;
use crate::game_state::Square;

/// Result of a single square click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First click: the square is now selected.
    Selected(Square),
    /// The selected square was clicked again and is no longer selected.
    Deselected,
    /// Second click completed a legal move, which was played.
    Moved(Move),
    /// Second click described a move that is not legal; nothing changed.
    Ignored(Move),
}

/// Error returned by [`Session::try_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{from}{to} is not a legal move")]
pub struct IllegalMove {
    pub from: Square,
    pub to: Square,
}

/// Click-driven front end to a [`GameEngine`].
///
/// Keeps the legal-move list for the position on the board, refreshed once
/// at start and after every move or undo, and turns pairs of square clicks
/// into moves. Anything not in the list is ignored rather than rejected.
#[derive(Debug, Clone)]
pub struct Session {
    engine: GameEngine,
    valid_moves: Vec<Move>,
    selected: Option<Square>,
}

impl Session {
    pub fn new(mut engine: GameEngine) -> Self {
        let valid_moves = engine.get_valid_moves();
        Self {
            engine,
            valid_moves,
            selected: None,
        }
    }

    #[inline]
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Legal moves in the current position.
    #[inline]
    pub fn valid_moves(&self) -> &[Move] {
        &self.valid_moves
    }

    /// The square picked by the first of two clicks, if any.
    #[inline]
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// Handle a click on `square`.
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        let Some(from) = self.selected else {
            self.selected = Some(square);
            return ClickOutcome::Selected(square);
        };
        self.selected = None;

        if from == square {
            return ClickOutcome::Deselected;
        }

        match self.play(from, square) {
            Ok(mv) => ClickOutcome::Moved(mv),
            Err(mv) => ClickOutcome::Ignored(mv),
        }
    }

    /// Play `from` → `to` if it is legal.
    pub fn try_move(&mut self, from: Square, to: Square) -> Result<Move, IllegalMove> {
        self.selected = None;
        self.play(from, to).map_err(|_| IllegalMove { from, to })
    }

    /// Take back the last move, if any.
    pub fn undo(&mut self) -> Option<Move> {
        self.selected = None;
        let undone = self.engine.undo_move();
        self.refresh();
        undone
    }

    /// Replace the game with `engine`.
    pub fn reset(&mut self, engine: GameEngine) {
        *self = Self::new(engine);
    }

    fn play(&mut self, from: Square, to: Square) -> Result<Move, Move> {
        let mv = Move::new(from, to, self.engine.board());
        log::info!("{mv}");

        if !self.valid_moves.contains(&mv) {
            log::debug!("ignoring illegal move {from}{to}");
            return Err(mv);
        }

        self.engine.make_move(mv);
        self.refresh();
        Ok(mv)
    }

    fn refresh(&mut self) {
        self.valid_moves = self.engine.get_valid_moves();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameEngine::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::{Color, Piece, PieceKind};

    fn sq(s: &str) -> Square {
        s.parse().expect("test square should be valid")
    }

    #[test]
    fn test_two_clicks_play_a_move() {
        let mut session = Session::default();

        assert_eq!(session.click(sq("e2")), ClickOutcome::Selected(sq("e2")));
        assert_eq!(session.selected(), Some(sq("e2")));

        let outcome = session.click(sq("e4"));
        let ClickOutcome::Moved(mv) = outcome else {
            panic!("expected a move, got {outcome:?}");
        };
        assert_eq!(mv.notation(), "e4");
        assert_eq!(session.selected(), None);
        assert!(!session.engine().white_to_move());
        assert_eq!(session.valid_moves().len(), 20);
    }

    #[test]
    fn test_same_square_twice_deselects() {
        let mut session = Session::default();

        session.click(sq("g1"));
        assert_eq!(session.click(sq("g1")), ClickOutcome::Deselected);
        assert_eq!(session.selected(), None);
        assert!(session.engine().move_log().is_empty());
    }

    #[test]
    fn test_illegal_move_is_ignored() {
        let mut session = Session::default();

        session.click(sq("e2"));
        let outcome = session.click(sq("e5"));

        assert!(matches!(outcome, ClickOutcome::Ignored(_)));
        assert_eq!(session.selected(), None);
        assert_eq!(
            session.engine().piece_at(sq("e2")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert!(session.engine().white_to_move());
    }

    #[test]
    fn test_clicking_opponent_piece_is_ignored() {
        let mut session = Session::default();

        session.click(sq("e7"));
        assert!(matches!(
            session.click(sq("e5")),
            ClickOutcome::Ignored(_)
        ));
        assert!(session.engine().move_log().is_empty());
    }

    #[test]
    fn test_try_move_reports_illegal() {
        let mut session = Session::default();

        assert_eq!(
            session.try_move(sq("b1"), sq("b3")),
            Err(IllegalMove {
                from: sq("b1"),
                to: sq("b3")
            })
        );
        assert!(session.try_move(sq("b1"), sq("c3")).is_ok());
    }

    #[test]
    fn test_undo_refreshes_valid_moves() {
        let mut session = Session::default();
        session.try_move(sq("e2"), sq("e4")).unwrap();

        let undone = session.undo().expect("one move to undo");
        assert_eq!(undone.notation(), "e4");
        assert!(session.engine().white_to_move());
        assert_eq!(session.valid_moves().len(), 20);
        assert!(
            session
                .valid_moves()
                .iter()
                .all(|mv| mv.piece_moved().is_some_and(|p| p.color == Color::White))
        );
    }

    #[test]
    fn test_undo_without_moves() {
        let mut session = Session::default();
        assert_eq!(session.undo(), None);
        assert_eq!(session.valid_moves().len(), 20);
    }

    #[test]
    fn test_reset_starts_over() {
        let mut session = Session::default();
        session.try_move(sq("d2"), sq("d4")).unwrap();
        session.click(sq("d7"));

        session.reset(GameEngine::new());

        assert_eq!(session.selected(), None);
        assert!(session.engine().move_log().is_empty());
    }
}
