//! Attack detection.
//!
//! [`square_under_attack`] is the reference: it regenerates the attacker's
//! pseudo-legal moves and looks for one landing on the square.
//! [`square_attacked`] answers from piece geometry without building a move
//! list. The two agree whenever the queried square holds a piece of the
//! defending side, which is always the case for a king square.

use std::str::FromStr;

use thiserror::Error;

use super::movegen::{
    BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS, pseudo_legal_moves,
};
use crate::game_state::{Board, Color, Piece, PieceKind, Square};

/// True iff some pseudo-legal move of `by` ends on `square`.
///
/// Pawn advances count as well as pawn captures, so on an empty square this
/// reports "reachable" rather than strictly "attacked".
pub fn square_under_attack(board: &Board, square: Square, by: Color) -> bool {
    pseudo_legal_moves(board, by)
        .iter()
        .any(|mv| mv.end() == square)
}

/// True iff a piece of `by` attacks `square`, computed from geometry alone.
pub fn square_attacked(board: &Board, square: Square, by: Color) -> bool {
    let holds = |target: Option<Square>, kinds: &[PieceKind]| {
        target
            .and_then(|sq| board.piece_at(sq))
            .is_some_and(|p| p.color == by && kinds.contains(&p.kind))
    };

    // A pawn of `by` attacks diagonally forward, so look one row back.
    let back = -by.forward();
    if holds(square.offset(back, -1), &[PieceKind::Pawn])
        || holds(square.offset(back, 1), &[PieceKind::Pawn])
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(dr, dc)| holds(square.offset(dr, dc), &[PieceKind::Knight]))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(dr, dc)| holds(square.offset(dr, dc), &[PieceKind::King]))
    {
        return true;
    }

    ray_hits(board, square, by, &ROOK_DIRECTIONS, PieceKind::Rook)
        || ray_hits(board, square, by, &BISHOP_DIRECTIONS, PieceKind::Bishop)
}

/// Whether the first piece along any of `directions` is a `slider` or queen of `by`.
fn ray_hits(
    board: &Board,
    square: Square,
    by: Color,
    directions: &[(i8, i8)],
    slider: PieceKind,
) -> bool {
    directions.iter().any(|&(dr, dc)| {
        let mut current = square;
        while let Some(next) = current.offset(dr, dc) {
            if let Some(Piece { color, kind }) = board.piece_at(next) {
                return color == by && (kind == slider || kind == PieceKind::Queen);
            }
            current = next;
        }
        false
    })
}

/// Which attack test the engine uses for check detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckDetection {
    /// Regenerate the opponent's pseudo-legal moves ([`square_under_attack`]).
    #[default]
    Regenerate,
    /// Walk piece geometry outward from the square ([`square_attacked`]).
    Geometry,
}

impl CheckDetection {
    pub fn is_attacked(self, board: &Board, square: Square, by: Color) -> bool {
        match self {
            CheckDetection::Regenerate => square_under_attack(board, square, by),
            CheckDetection::Geometry => square_attacked(board, square, by),
        }
    }
}

impl FromStr for CheckDetection {
    type Err = UnknownCheckDetection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regenerate" => Ok(CheckDetection::Regenerate),
            "geometry" => Ok(CheckDetection::Geometry),
            _ => Err(UnknownCheckDetection(s.to_string())),
        }
    }
}

/// Error when parsing a [`CheckDetection`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown check detection '{0}' (expected 'regenerate' or 'geometry')")]
pub struct UnknownCheckDetection(String);
