//! Check detection.

use crate::legality::is_legal;
use chess_core::{Board, Color, Move};

/// Returns true if `color`'s king could be captured by some enemy piece.
///
/// "Attacked" means an opposing piece has a legal move onto the king's
/// square, using the same evaluator as ordinary moves. That attacker's own
/// king safety is not considered. A board without a king of `color` is
/// reported as not in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.king_square(color) else {
        return false;
    };
    board
        .pieces(color.opposite())
        .any(|(sq, _)| is_legal(board, Move::new(sq, king)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(placement: &str) -> Board {
        Board::from_placement(placement).unwrap()
    }

    #[test]
    fn startpos_no_check() {
        let b = Board::startpos();
        assert!(!is_in_check(&b, Color::White));
        assert!(!is_in_check(&b, Color::Black));
    }

    #[test]
    fn rook_gives_check_along_file() {
        let b = board("4r3/8/8/8/8/8/8/4K3");
        assert!(is_in_check(&b, Color::White));
        assert!(!is_in_check(&b, Color::Black));
    }

    #[test]
    fn blocked_rook_gives_no_check() {
        let b = board("4r3/8/8/8/4P3/8/8/4K3");
        assert!(!is_in_check(&b, Color::White));
    }

    #[test]
    fn knight_check_ignores_blockers() {
        let b = board("8/8/8/8/8/3n4/3PPP2/4K3");
        assert!(is_in_check(&b, Color::White));
    }

    #[test]
    fn pawn_checks_diagonally_only() {
        let b = board("8/8/8/8/8/3p4/4K3/8");
        assert!(is_in_check(&b, Color::White));
        let b = board("8/8/8/8/8/4p3/4K3/8");
        assert!(!is_in_check(&b, Color::White));
    }

    #[test]
    fn adjacent_kings_attack_each_other() {
        let b = board("8/8/8/8/8/8/4k3/4K3");
        assert!(is_in_check(&b, Color::White));
        assert!(is_in_check(&b, Color::Black));
    }

    #[test]
    fn missing_king_is_not_check() {
        let b = board("4r3/8/8/8/8/8/8/8");
        assert!(!is_in_check(&b, Color::White));
    }
}
