use std::fmt;
use std::ops::Index;

use shakmaty::fen::{Fen, ParseFenError};
use thiserror::Error;

use super::piece::{Color, Piece, PieceKind};
use super::square::{BOARD_SIZE, Square};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Chess board using a mailbox (8×8 array) representation.
///
/// Coordinate system:
/// - `squares[0][0]` = a8 (top-left from white's perspective)
/// - `squares[7][7]` = h1 (bottom-right from white's perspective)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Create a board with no pieces on it.
    pub const fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard starting position.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(Color::Black, kind));
            board.squares[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board.squares[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board.squares[7][col] = Some(Piece::new(Color::White, kind));
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize][square.col() as usize]
    }

    #[inline]
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row() as usize][square.col() as usize] = piece;
    }

    /// Occupied squares with their pieces, in scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// First square holding a king of `color`, scanning from a8.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| *piece == Piece::new(color, PieceKind::King))
            .map(|(square, _)| square)
    }

    /// Parse the piece placement of a FEN string.
    ///
    /// The fields after the placement are checked for syntax but not used.
    pub fn from_fen_placement(fen: &str) -> Result<Self, FenError> {
        let setup = fen.parse::<Fen>()?.into_setup();
        Ok(Self::from(&setup.board))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    fn index(&self, square: Square) -> &Self::Output {
        &self.squares[square.row() as usize][square.col() as usize]
    }
}

impl From<&shakmaty::Board> for Board {
    fn from(board: &shakmaty::Board) -> Self {
        let mut out = Self::empty();
        for square in Square::all() {
            out.set_piece(square, board.piece_at(square.into()).map(Piece::from));
        }
        out
    }
}

impl From<&Board> for shakmaty::Board {
    fn from(board: &Board) -> Self {
        let mut out = shakmaty::Board::empty();
        for (square, piece) in board.pieces() {
            out.set_piece_at(square.into(), piece.into());
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, rank) in self.squares.iter().enumerate() {
            write!(f, "{} ", BOARD_SIZE as usize - row)?;
            for square in rank {
                let c = square.map_or('.', Piece::fen_char);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

/// Error type for parsing FEN input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error(transparent)]
    Parse(#[from] ParseFenError),
    #[error("expected exactly one {0} king, found {1}")]
    KingCount(Color, usize),
}
