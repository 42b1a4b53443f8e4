use crate::game_logic::{Move, Session};
use crate::game_state::Square;

/// Type of visual feedback for an individual square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareFeedback {
    /// The selected piece stands here
    Origin,
    /// The selected piece may move here
    Destination,
    /// The selected piece may capture here
    Capture,
    /// The side to move has its king here, in check
    Check,
}

/// Contains the set of squares and their associated feedback types for the current board state.
///
/// `BoardFeedback` is computed by [`compute_feedback`] and consumed by a
/// [`BoardDisplay`](crate::BoardDisplay) to highlight squares for the player.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardFeedback {
    squares: Vec<(Square, SquareFeedback)>,
}

impl BoardFeedback {
    /// Create empty feedback (no highlights)
    #[inline]
    pub const fn new() -> Self {
        Self {
            squares: Vec::new(),
        }
    }

    /// Get all square feedback entries
    #[inline]
    pub fn squares(&self) -> &[(Square, SquareFeedback)] {
        &self.squares
    }

    /// Get feedback for a specific square, if any
    #[inline]
    pub fn get(&self, square: Square) -> Option<SquareFeedback> {
        self.squares
            .iter()
            .find(|(sq, _)| *sq == square)
            .map(|(_, feedback)| *feedback)
    }

    /// Set feedback for a square, replacing any previous entry.
    pub fn set(&mut self, square: Square, feedback: SquareFeedback) {
        match self.squares.iter_mut().find(|(sq, _)| *sq == square) {
            Some(entry) => entry.1 = feedback,
            None => self.squares.push((square, feedback)),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}

/// Game state information needed to compute feedback
pub trait FeedbackSource {
    /// Legal moves in the current position
    fn valid_moves(&self) -> &[Move];

    /// Square picked by the player's first click, if any
    fn selected(&self) -> Option<Square>;

    /// King square of the side to move, when that king is in check
    fn check_square(&self) -> Option<Square>;
}

impl FeedbackSource for Session {
    fn valid_moves(&self) -> &[Move] {
        Session::valid_moves(self)
    }

    fn selected(&self) -> Option<Square> {
        Session::selected(self)
    }

    fn check_square(&self) -> Option<Square> {
        let engine = self.engine();
        engine
            .in_check()
            .then(|| engine.king_square(engine.side_to_move()))
    }
}

/// Compute visual feedback based on current game state.
///
/// - A king in check is always marked.
/// - A selected square shows its legal destinations, split into plain
///   moves and captures.
pub fn compute_feedback(source: &impl FeedbackSource) -> BoardFeedback {
    let mut feedback = BoardFeedback::new();

    if let Some(king) = source.check_square() {
        feedback.set(king, SquareFeedback::Check);
    }

    if let Some(from) = source.selected() {
        feedback.set(from, SquareFeedback::Origin);
        for (square, kind) in source
            .valid_moves()
            .iter()
            .filter(|mv| mv.start() == from)
            .map(classify_move)
        {
            feedback.set(square, kind);
        }
    }

    feedback
}

/// Classify a move as either a capture or regular destination
fn classify_move(mv: &Move) -> (Square, SquareFeedback) {
    if mv.is_capture() {
        (mv.end(), SquareFeedback::Capture)
    } else {
        (mv.end(), SquareFeedback::Destination)
    }
}
