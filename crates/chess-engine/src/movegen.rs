//! Move enumeration.
//!
//! There is no dedicated generator: every origin/destination pair is run
//! through [`is_legal`]. The scan order is row-major for origins and, within
//! each origin, row-major for destinations; callers that pick "the first"
//! move rely on this order.

use crate::legality::is_legal;
use chess_core::{Board, Color, Move, Square};

/// Returns every legal move for `color`, in scan order.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    board
        .pieces(color)
        .flat_map(|(from, _)| legal_moves_from(board, from))
        .collect()
}

/// Returns the legal moves of the piece standing on `from`, in scan order.
///
/// An empty square yields no moves.
pub fn legal_moves_from(board: &Board, from: Square) -> Vec<Move> {
    Square::all()
        .map(|to| Move::new(from, to))
        .filter(|m| is_legal(board, *m))
        .collect()
}

/// Returns true if `color` has at least one legal move.
///
/// Stops at the first move found.
pub fn has_legal_move(board: &Board, color: Color) -> bool {
    first_legal_move(board, color).is_some()
}

/// Returns the first legal move for `color` in scan order.
pub fn first_legal_move(board: &Board, color: Color) -> Option<Move> {
    board.pieces(color).find_map(|(from, _)| {
        Square::all()
            .map(|to| Move::new(from, to))
            .find(|m| is_legal(board, *m))
    })
}
