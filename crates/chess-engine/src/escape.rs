//! Searching for a move that lifts check.

use crate::check::is_in_check;
use crate::legality::is_legal;
use chess_core::{Board, Color, Move, PieceKind, Square};

/// Finds a legal move after which `color` is no longer in check.
///
/// King steps to adjacent squares are tried first, in row-major delta
/// order. Failing that, every other piece of `color` is tried against every
/// destination, both in row-major order, which covers blocks and captures.
/// Each candidate is played on a scratch copy; `board` is never touched.
///
/// `None` means nothing helps. It does not by itself tell a mate apart from
/// a position that was never in check, so callers classify separately.
pub fn find_escape(board: &Board, color: Color) -> Option<Move> {
    king_relocation(board, color).or_else(|| block_or_capture(board, color))
}

fn king_relocation(board: &Board, color: Color) -> Option<Move> {
    let king = board.king_square(color)?;
    (-1..=1)
        .flat_map(|dr| (-1..=1).map(move |df| (dr, df)))
        .filter(|&delta| delta != (0, 0))
        .filter_map(|(dr, df)| king.offset(dr, df))
        .map(|to| Move::new(king, to))
        .find(|m| lifts_check(board, color, *m))
}

fn block_or_capture(board: &Board, color: Color) -> Option<Move> {
    board
        .pieces(color)
        .filter(|(_, piece)| piece.kind != PieceKind::King)
        .find_map(|(from, _)| {
            Square::all()
                .map(|to| Move::new(from, to))
                .find(|m| lifts_check(board, color, *m))
        })
}

fn lifts_check(board: &Board, color: Color, mov: Move) -> bool {
    is_legal(board, mov) && !is_in_check(&board.with_move(mov), color)
}
