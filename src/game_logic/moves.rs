use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::{Board, Piece, PieceKind, Square};

/// A move between two squares, bound to the board it was built against.
///
/// The moved and captured pieces are read from the board at construction
/// time, so a `Move` describes that board snapshot only and must be rebuilt
/// once the board changes. Nothing is validated here: any two squares make
/// a `Move`, and legality is decided by [`GameEngine::get_valid_moves`].
///
/// Equality and hashing use [`Move::id`], i.e. the four coordinates only.
/// Two moves between the same squares compare equal even when they were
/// built against different boards.
///
/// [`GameEngine::get_valid_moves`]: super::GameEngine::get_valid_moves
#[derive(Debug, Clone, Copy)]
pub struct Move {
    start: Square,
    end: Square,
    piece_moved: Option<Piece>,
    piece_captured: Option<Piece>,
}

impl Move {
    pub fn new(start: Square, end: Square, board: &Board) -> Self {
        Self {
            start,
            end,
            piece_moved: board.piece_at(start),
            piece_captured: board.piece_at(end),
        }
    }

    #[inline]
    pub const fn start(&self) -> Square {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> Square {
        self.end
    }

    /// The piece standing on the start square when the move was built.
    #[inline]
    pub const fn piece_moved(&self) -> Option<Piece> {
        self.piece_moved
    }

    /// The piece standing on the end square when the move was built.
    #[inline]
    pub const fn piece_captured(&self) -> Option<Piece> {
        self.piece_captured
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    /// Identity key: `start_row*1000 + start_col*100 + end_row*10 + end_col`.
    pub const fn id(&self) -> u16 {
        self.start.row() as u16 * 1000
            + self.start.col() as u16 * 100
            + self.end.row() as u16 * 10
            + self.end.col() as u16
    }

    /// Algebraic-like notation: "e4", "Nf3", "exd5", "Qxh7".
    ///
    /// Pawns carry no letter; a pawn capture is prefixed with the file the
    /// pawn left from instead.
    pub fn notation(&self) -> String {
        let mut out = String::with_capacity(5);
        match self.piece_moved.map(|piece| piece.kind) {
            Some(PieceKind::Pawn) => {
                if self.is_capture() {
                    out.push(self.start.file());
                }
            }
            Some(kind) => out.push(kind.letter()),
            None => {}
        }
        if self.is_capture() {
            out.push('x');
        }
        out.push_str(&self.end.to_string());
        out
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.notation())
    }
}
