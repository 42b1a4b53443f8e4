use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: u8 = 8;

/// A square on the 8×8 board, addressed by row and column.
///
/// Row 0 is black's back rank (rank 8) and row 7 is white's back rank
/// (rank 1). Column 0 is the a-file, column 7 the h-file.
///
/// A `Square` is always on the board: [`Square::new`], [`Square::offset`]
/// and parsing all reject out-of-range coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// White king's home square.
    pub const E1: Square = Square { row: 7, col: 4 };
    /// Black king's home square.
    pub const E8: Square = Square { row: 0, col: 4 };

    /// Creates a square if both coordinates are in 0..8.
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the file ('a'-'h') of this square.
    pub const fn file(self) -> char {
        (b'a' + self.col) as char
    }

    /// Returns the rank (1-8) of this square.
    pub const fn rank(self) -> u8 {
        BOARD_SIZE - self.row
    }

    /// Returns the square `dr` rows and `dc` columns away, if it is on the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// All 64 squares in scan order: row 0 first, left to right.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { row, col }))
    }
}

/// Parse algebraic notation like "e4" into a Square.
///
/// # Examples
/// ```
/// # use chess_board_engine::game_state::Square;
/// let square: Square = "e4".parse().unwrap();
/// assert_eq!((square.row(), square.col()), (4, 4));
/// ```
impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareParseError::WrongLength);
        };

        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            return Err(SquareParseError::BadFile);
        }
        let rank = rank.to_digit(10).ok_or(SquareParseError::BadRank)?;
        if !(1..=8).contains(&rank) {
            return Err(SquareParseError::BadRank);
        }

        Ok(Square {
            row: BOARD_SIZE - rank as u8,
            col: file as u8 - b'a',
        })
    }
}

/// Display square in algebraic notation (e.g., "e4").
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl From<Square> for shakmaty::Square {
    fn from(square: Square) -> Self {
        shakmaty::Square::from_coords(
            shakmaty::File::new(u32::from(square.col)),
            shakmaty::Rank::new(u32::from(square.rank() - 1)),
        )
    }
}

impl From<shakmaty::Square> for Square {
    fn from(square: shakmaty::Square) -> Self {
        Square {
            row: BOARD_SIZE - 1 - square.rank() as u8,
            col: square.file() as u8,
        }
    }
}

/// Error type for parsing square notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SquareParseError {
    /// Square notation must be exactly 2 characters
    #[error("square must be 2 characters (e.g., 'e4')")]
    WrongLength,
    /// File must be a letter from a-h
    #[error("file must be a-h")]
    BadFile,
    /// Rank must be a digit from 1-8
    #[error("rank must be 1-8")]
    BadRank,
}
