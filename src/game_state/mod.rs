//! Board data model: squares, pieces and the 8×8 mailbox.

mod board;
mod piece;
mod square;

pub use board::{Board, FenError};
pub use piece::{Color, Piece, PieceKind};
pub use square::{BOARD_SIZE, Square, SquareParseError};
