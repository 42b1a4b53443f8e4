//! Pseudo-legal move generation.
//!
//! Every function here enumerates geometrically reachable destinations and
//! ignores whether the mover's own king is left in check; that filter lives
//! in [`GameEngine::get_valid_moves`](super::GameEngine::get_valid_moves).

use super::moves::Move;
use crate::game_state::{Board, Color, Piece, PieceKind, Square};

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (2, -1),
    (2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
];

/// All pseudo-legal moves for `color`, scanning the board from a8 to h1.
pub fn pseudo_legal_moves(board: &Board, color: Color) -> Vec<Move> {
    let mut moves = Vec::with_capacity(48);
    for (from, piece) in board.pieces() {
        if piece.color == color {
            piece_moves(board, from, piece, &mut moves);
        }
    }
    moves
}

/// Append the pseudo-legal moves of `piece` standing on `from`.
pub fn piece_moves(board: &Board, from: Square, piece: Piece, moves: &mut Vec<Move>) {
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece.color, moves),
        PieceKind::Knight => step_moves(board, from, piece.color, &KNIGHT_OFFSETS, moves),
        PieceKind::Bishop => slide_moves(board, from, piece.color, &BISHOP_DIRECTIONS, moves),
        PieceKind::Rook => slide_moves(board, from, piece.color, &ROOK_DIRECTIONS, moves),
        PieceKind::Queen => {
            slide_moves(board, from, piece.color, &ROOK_DIRECTIONS, moves);
            slide_moves(board, from, piece.color, &BISHOP_DIRECTIONS, moves);
        }
        // Castling is not generated.
        PieceKind::King => step_moves(board, from, piece.color, &KING_OFFSETS, moves),
    }
}

/// Single and double advances onto empty squares, diagonal captures onto
/// enemy pieces. No en passant, no promotion: a pawn on the far rank has
/// nowhere to go.
fn pawn_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Move>) {
    let forward = color.forward();

    if let Some(one) = from.offset(forward, 0)
        && board.piece_at(one).is_none()
    {
        moves.push(Move::new(from, one, board));

        if from.row() == color.pawn_home_row()
            && let Some(two) = from.offset(2 * forward, 0)
            && board.piece_at(two).is_none()
        {
            moves.push(Move::new(from, two, board));
        }
    }

    for dc in [-1, 1] {
        if let Some(target) = from.offset(forward, dc)
            && board.piece_at(target).is_some_and(|p| p.color != color)
        {
            moves.push(Move::new(from, target, board));
        }
    }
}

/// Walk each ray outward until the edge or the first occupied square,
/// including that square only when it holds an enemy piece.
fn slide_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(to) = current.offset(dr, dc) {
            match board.piece_at(to) {
                None => moves.push(Move::new(from, to, board)),
                Some(p) => {
                    if p.color != color {
                        moves.push(Move::new(from, to, board));
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

/// Fixed offsets (knight and king): any on-board square not held by a
/// friendly piece.
fn step_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in offsets {
        if let Some(to) = from.offset(dr, dc)
            && board.piece_at(to).is_none_or(|p| p.color != color)
        {
            moves.push(Move::new(from, to, board));
        }
    }
}
