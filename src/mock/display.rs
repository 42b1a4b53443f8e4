use std::io::{self, Write};

use crate::BoardDisplay;
use crate::feedback::{BoardFeedback, SquareFeedback};
use crate::game_state::{Board, Piece, Square};

/// Terminal-based board display for development and testing.
///
/// Renders the board as an 8×8 grid of piece letters with ANSI
/// color-coded backgrounds matching the feedback type.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    /// Create a new terminal display.
    pub fn new() -> Self {
        Self
    }
}

/// Error type for terminal display operations.
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to write to terminal: {0}")]
    Io(#[from] io::Error),
}

impl BoardDisplay for TerminalDisplay {
    type Error = DisplayError;

    fn show(&mut self, board: &Board, feedback: &BoardFeedback) -> Result<(), Self::Error> {
        render_board(&mut io::stdout(), board, feedback)
    }
}

/// Render board and feedback to any writer. Extracted for testability.
pub(crate) fn render_board(
    w: &mut impl Write,
    board: &Board,
    feedback: &BoardFeedback,
) -> Result<(), DisplayError> {
    for row in 0..8 {
        write!(w, " {} ", 8 - row)?;
        for col in 0..8 {
            let Some(square) = Square::new(row, col) else {
                continue;
            };
            let cell = format_square(board.piece_at(square), feedback.get(square));
            write!(w, "{cell}")?;
        }
        writeln!(w)?;
    }
    writeln!(w, "    a  b  c  d  e  f  g  h")?;
    w.flush()?;
    Ok(())
}

/// Map a piece and feedback variant to an ANSI-colored cell string.
fn format_square(piece: Option<Piece>, feedback: Option<SquareFeedback>) -> String {
    let symbol = piece.map_or('·', Piece::fen_char);
    match feedback {
        Some(SquareFeedback::Destination) => format!("\x1b[44m {symbol} \x1b[0m"),
        Some(SquareFeedback::Capture) => format!("\x1b[41m {symbol} \x1b[0m"),
        Some(SquareFeedback::Origin) => format!("\x1b[42m {symbol} \x1b[0m"),
        Some(SquareFeedback::Check) => format!("\x1b[45m {symbol} \x1b[0m"),
        None => format!(" {symbol} "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(board: &Board, feedback: &BoardFeedback) -> String {
        let mut buf = Vec::new();
        render_board(&mut buf, board, feedback).expect("rendering to buffer should succeed");
        String::from_utf8(buf).expect("output should be valid UTF-8")
    }

    fn sq(s: &str) -> Square {
        s.parse().expect("test square should be valid")
    }

    #[test]
    fn show_board_contains_all_ranks() {
        let output = render_to_string(&Board::starting_position(), &BoardFeedback::new());

        for rank in '1'..='8' {
            assert!(
                output.contains(rank),
                "output should contain rank label '{rank}'"
            );
        }
        assert!(
            output.contains("a  b  c  d  e  f  g  h"),
            "output should contain file labels"
        );
    }

    #[test]
    fn show_board_draws_pieces() {
        let output = render_to_string(&Board::starting_position(), &BoardFeedback::new());
        let first_line = output.lines().next().expect("at least one line");

        assert_eq!(first_line, " 8  r  n  b  q  k  b  n  r ");
    }

    #[test]
    fn show_destination_uses_blue_background() {
        let mut feedback = BoardFeedback::new();
        feedback.set(sq("e4"), SquareFeedback::Destination);

        let output = render_to_string(&Board::starting_position(), &feedback);
        assert!(output.contains("\x1b[44m · \x1b[0m"));
    }

    #[test]
    fn show_capture_uses_red_background() {
        let mut feedback = BoardFeedback::new();
        feedback.set(sq("d7"), SquareFeedback::Capture);

        let output = render_to_string(&Board::starting_position(), &feedback);
        assert!(output.contains("\x1b[41m p \x1b[0m"));
    }

    #[test]
    fn show_origin_uses_green_background() {
        let mut feedback = BoardFeedback::new();
        feedback.set(sq("e2"), SquareFeedback::Origin);

        let output = render_to_string(&Board::starting_position(), &feedback);
        assert!(output.contains("\x1b[42m P \x1b[0m"));
    }

    #[test]
    fn show_check_uses_magenta_background() {
        let mut feedback = BoardFeedback::new();
        feedback.set(sq("e8"), SquareFeedback::Check);

        let output = render_to_string(&Board::starting_position(), &feedback);
        assert!(output.contains("\x1b[45m k \x1b[0m"));
    }

    #[test]
    fn empty_feedback_has_no_ansi_codes() {
        let output = render_to_string(&Board::starting_position(), &BoardFeedback::new());

        assert!(
            !output.contains("\x1b[4"),
            "empty feedback should have no ANSI background codes"
        );
    }
}
