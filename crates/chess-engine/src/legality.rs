//! Per-piece move legality.
//!
//! A move is legal here when the piece on the origin can geometrically reach
//! the destination on the current board: the path is clear for sliders, the
//! destination does not hold a friendly piece, and pawns obey their
//! push/capture asymmetry. Whether the move leaves the mover's own king
//! attacked is deliberately not considered.

use chess_core::{Board, Color, Move, Piece, PieceKind, Square};

/// Returns true if the move is legal on the board.
///
/// Never mutates the board. An empty origin, a null move, or a destination
/// holding a piece of the mover's color all yield `false`.
pub fn is_legal(board: &Board, mov: Move) -> bool {
    let Some(piece) = board.piece_at(mov.from()) else {
        return false;
    };
    if mov.from() == mov.to() {
        return false;
    }
    if let Some(target) = board.piece_at(mov.to()) {
        if target.color == piece.color {
            return false;
        }
    }
    is_reachable(board, piece, mov)
}

/// Checks a move given in raw coordinates, rejecting anything off-board.
pub fn is_legal_coords(board: &Board, from: (i32, i32), to: (i32, i32)) -> bool {
    match (
        Square::from_coords(from.0, from.1),
        Square::from_coords(to.0, to.1),
    ) {
        (Some(from), Some(to)) => is_legal(board, Move::new(from, to)),
        _ => false,
    }
}

fn is_reachable(board: &Board, piece: Piece, mov: Move) -> bool {
    let (from, to) = (mov.from(), mov.to());
    match piece.kind {
        PieceKind::Pawn => pawn_move(board, piece.color, from, to),
        PieceKind::Knight => knight_move(mov),
        PieceKind::Bishop => bishop_move(board, mov),
        PieceKind::Rook => rook_move(board, mov),
        PieceKind::Queen => rook_move(board, mov) || bishop_move(board, mov),
        PieceKind::King => king_move(mov),
    }
}

fn deltas(from: Square, to: Square) -> (i32, i32) {
    (
        to.rank() as i32 - from.rank() as i32,
        to.file() as i32 - from.file() as i32,
    )
}

fn pawn_move(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let (dr, df) = deltas(from, to);
    let dir = color.pawn_direction() as i32;

    if df == 0 {
        if dr == dir {
            return board.is_empty(to);
        }
        if dr == 2 * dir && from.rank() == color.pawn_start_rank() {
            let passed = from.offset(dir, 0);
            return board.is_empty(to) && passed.is_some_and(|sq| board.is_empty(sq));
        }
        return false;
    }

    // Diagonal steps only ever capture; there is no en passant.
    df.abs() == 1
        && dr == dir
        && board
            .piece_at(to)
            .is_some_and(|target| target.color == color.opposite())
}

fn knight_move(mov: Move) -> bool {
    matches!(mov.distance(), (1, 2) | (2, 1))
}

fn rook_move(board: &Board, mov: Move) -> bool {
    let (dr, df) = mov.distance();
    (dr == 0 || df == 0) && path_clear(board, mov.from(), mov.to())
}

fn bishop_move(board: &Board, mov: Move) -> bool {
    let (dr, df) = mov.distance();
    dr == df && path_clear(board, mov.from(), mov.to())
}

fn king_move(mov: Move) -> bool {
    let (dr, df) = mov.distance();
    if dr <= 1 && df <= 1 {
        return true;
    }
    // Two squares sideways is accepted as a castling candidate. Rook presence,
    // prior movement and attacked transit squares are not verified.
    dr == 0 && df == 2
}

/// Returns true if every square strictly between `from` and `to` is empty.
///
/// The squares must share a rank, file or diagonal; for any other pair the
/// walk would never land on `to`, so `false` is returned. The endpoints
/// themselves are never inspected.
pub fn path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (dr, df) = deltas(from, to);
    if !(dr == 0 || df == 0 || dr.abs() == df.abs()) {
        return false;
    }
    let (step_r, step_f) = (dr.signum(), df.signum());

    let mut current = from.offset(step_r, step_f);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if !board.is_empty(sq) {
            return false;
        }
        current = sq.offset(step_r, step_f);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(placement: &str) -> Board {
        Board::from_placement(placement).unwrap()
    }

    fn legal(board: &Board, uci: &str) -> bool {
        is_legal(board, Move::from_uci(uci).unwrap())
    }

    #[test]
    fn empty_origin_is_illegal() {
        assert!(!legal(&Board::startpos(), "e4e5"));
    }

    #[test]
    fn null_move_is_illegal() {
        assert!(!legal(&Board::startpos(), "e2e2"));
    }

    #[test]
    fn off_board_coordinates_are_illegal() {
        let b = Board::startpos();
        assert!(!is_legal_coords(&b, (6, 4), (8, 4)));
        assert!(!is_legal_coords(&b, (-1, 0), (0, 0)));
        assert!(is_legal_coords(&b, (6, 4), (4, 4)));
    }

    #[test]
    fn no_self_capture() {
        let b = Board::startpos();
        assert!(!legal(&b, "a1a2"));
        assert!(!legal(&b, "d1e1"));
    }

    #[test]
    fn pawn_single_and_double_push() {
        let b = Board::startpos();
        assert!(legal(&b, "e2e3"));
        assert!(legal(&b, "e2e4"));
        assert!(!legal(&b, "e2e5"));
        assert!(legal(&b, "d7d6"));
        assert!(legal(&b, "d7d5"));
        assert!(!legal(&b, "e2d3"));
    }

    #[test]
    fn pawn_cannot_move_backwards() {
        let b = board("8/8/8/8/4P3/8/8/8");
        assert!(!legal(&b, "e4e3"));
        let b = board("8/8/8/4p3/8/8/8/8");
        assert!(!legal(&b, "e5e6"));
    }

    #[test]
    fn pawn_double_push_needs_start_rank() {
        let b = board("8/8/8/8/8/4P3/8/8");
        assert!(legal(&b, "e3e4"));
        assert!(!legal(&b, "e3e5"));
    }

    #[test]
    fn pawn_double_push_blocked() {
        let b = board("8/8/8/8/8/4n3/4P3/8");
        assert!(!legal(&b, "e2e4"));
        assert!(!legal(&b, "e2e3"));
        let b = board("8/8/8/8/4n3/8/4P3/8");
        assert!(!legal(&b, "e2e4"));
        assert!(legal(&b, "e2e3"));
    }

    #[test]
    fn pawn_captures_diagonally_only() {
        let b = board("8/8/8/3p1P2/4P3/8/8/8");
        assert!(legal(&b, "e4d5"));
        assert!(!legal(&b, "e4f5"));
        let b = board("8/8/8/8/4P3/8/8/8");
        assert!(!legal(&b, "e4d5"));
    }

    #[test]
    fn pawn_forward_capture_is_illegal() {
        let b = board("8/8/8/4p3/4P3/8/8/8");
        assert!(!legal(&b, "e4e5"));
        assert!(!legal(&b, "e5e4"));
    }

    #[test]
    fn black_pawn_captures_toward_white() {
        let b = board("8/8/8/4p3/3P4/8/8/8");
        assert!(legal(&b, "e5d4"));
        assert!(legal(&b, "e5e4"));
    }

    #[test]
    fn rook_lines_and_blocking() {
        let b = board("8/8/8/8/R3p2k/8/8/8");
        assert!(legal(&b, "a4a8"));
        assert!(legal(&b, "a4d4"));
        assert!(legal(&b, "a4e4"));
        assert!(!legal(&b, "a4f4"));
        assert!(!legal(&b, "a4b5"));
    }

    #[test]
    fn bishop_diagonals_and_blocking() {
        let b = board("8/8/8/3p4/8/1B6/8/8");
        assert!(legal(&b, "b3c4"));
        assert!(legal(&b, "b3d5"));
        assert!(!legal(&b, "b3e6"));
        assert!(legal(&b, "b3a2"));
        assert!(!legal(&b, "b3b4"));
    }

    #[test]
    fn queen_combines_rook_and_bishop() {
        let b = board("8/8/8/8/3Q4/8/8/8");
        assert!(legal(&b, "d4d8"));
        assert!(legal(&b, "d4h4"));
        assert!(legal(&b, "d4g7"));
        assert!(legal(&b, "d4a1"));
        assert!(!legal(&b, "d4e6"));
    }

    #[test]
    fn knight_jumps() {
        let b = Board::startpos();
        assert!(legal(&b, "g1f3"));
        assert!(legal(&b, "g1h3"));
        assert!(!legal(&b, "g1e2"));
        assert!(!legal(&b, "g1g3"));
        assert!(!legal(&b, "b1b3"));
    }

    #[test]
    fn king_steps_and_castling_candidate() {
        let b = board("8/8/8/8/8/8/8/4K3");
        assert!(legal(&b, "e1d1"));
        assert!(legal(&b, "e1e2"));
        assert!(legal(&b, "e1f2"));
        assert!(legal(&b, "e1g1"));
        assert!(legal(&b, "e1c1"));
        assert!(!legal(&b, "e1e3"));
        assert!(!legal(&b, "e1g2"));
    }

    #[test]
    fn path_clear_excludes_endpoints() {
        let b = board("8/8/8/8/R6r/8/8/8");
        let a4 = Square::from_algebraic("a4").unwrap();
        let h4 = Square::from_algebraic("h4").unwrap();
        assert!(path_clear(&b, a4, h4));
        assert!(path_clear(&b, h4, a4));
    }

    #[test]
    fn path_clear_rejects_unaligned_squares() {
        let b = Board::empty();
        let a1 = Square::from_algebraic("a1").unwrap();
        let b3 = Square::from_algebraic("b3").unwrap();
        assert!(!path_clear(&b, a1, b3));
    }
}
