//! Game-end classification.
//!
//! Only checkmate and stalemate end a game. Repetition, move-count and
//! material draws are not part of this rule set.

use crate::check::is_in_check;
use crate::movegen::has_legal_move;
use chess_core::{Board, Color};
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalState {
    /// The side to move has at least one legal move.
    Ongoing,
    /// No legal move and in check; `loser` is the side to move.
    Checkmate { loser: Color },
    /// No legal move and not in check.
    Stalemate,
}

impl TerminalState {
    /// Returns true unless the game goes on.
    pub const fn is_terminal(self) -> bool {
        !matches!(self, TerminalState::Ongoing)
    }

    /// Returns the outcome of a finished game.
    pub const fn winner(self) -> Option<Winner> {
        match self {
            TerminalState::Ongoing => None,
            TerminalState::Checkmate { loser: Color::White } => Some(Winner::Black),
            TerminalState::Checkmate { loser: Color::Black } => Some(Winner::White),
            TerminalState::Stalemate => Some(Winner::Draw),
        }
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    White,
    Black,
    Draw,
}

impl Winner {
    /// Returns the wire label ("white", "black" or "draw").
    pub const fn label(self) -> &'static str {
        match self {
            Winner::White => "white",
            Winner::Black => "black",
            Winner::Draw => "draw",
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::White => write!(f, "White wins"),
            Winner::Black => write!(f, "Black wins"),
            Winner::Draw => write!(f, "Draw"),
        }
    }
}

/// Classifies the position for `to_move`.
///
/// Scans every origin/destination pair of `to_move` and stops at the first
/// legal move. Only when none exists is check consulted.
pub fn classify(board: &Board, to_move: Color) -> TerminalState {
    if has_legal_move(board, to_move) {
        TerminalState::Ongoing
    } else if is_in_check(board, to_move) {
        TerminalState::Checkmate { loser: to_move }
    } else {
        TerminalState::Stalemate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Fen;

    #[test]
    fn startpos_is_ongoing() {
        let b = Board::startpos();
        assert_eq!(classify(&b, Color::White), TerminalState::Ongoing);
        assert_eq!(classify(&b, Color::Black), TerminalState::Ongoing);
    }

    #[test]
    fn boxed_in_king_under_attack_is_mated() {
        // Black pawns on the first rank cannot move at all, and the ones on
        // the second rank are blocked by them; the knight on f2 checks h1.
        let fen = Fen::parse("K7/8/8/8/8/8/5Npp/5ppk b").unwrap();
        assert_eq!(
            classify(&fen.board, fen.side_to_move),
            TerminalState::Checkmate { loser: Color::Black }
        );
    }

    #[test]
    fn boxed_in_king_without_attack_is_stalemate() {
        let b = Board::from_placement("K7/8/8/8/8/8/6pp/5ppk").unwrap();
        assert!(!is_in_check(&b, Color::Black));
        assert_eq!(classify(&b, Color::Black), TerminalState::Stalemate);
    }

    #[test]
    fn king_walking_into_attack_still_counts_as_a_move() {
        // Every adjacent square is covered, but moves are not filtered for
        // self-check, so the game is not over.
        let b = Board::from_placement("k7/8/1Q6/8/8/8/8/7K").unwrap();
        assert_eq!(classify(&b, Color::Black), TerminalState::Ongoing);
    }

    #[test]
    fn winner_labels() {
        assert_eq!(
            TerminalState::Checkmate { loser: Color::White }.winner(),
            Some(Winner::Black)
        );
        assert_eq!(TerminalState::Stalemate.winner(), Some(Winner::Draw));
        assert_eq!(TerminalState::Ongoing.winner(), None);
        assert_eq!(Winner::Draw.label(), "draw");
        assert!(TerminalState::Stalemate.is_terminal());
        assert!(!TerminalState::Ongoing.is_terminal());
    }
}
