//! The individual tiers of the move-selection policy.
//!
//! Each [`Strategy`] either proposes a legal move for the given side or
//! declines. The policy in [`crate::Bot`] consults them in priority order.

use crate::config::{BotConfig, BotConfigError};
use chess_core::{Board, Color, Move, PieceKind};
use chess_engine::{
    find_escape, first_legal_move, is_in_check, is_legal, legal_moves, legal_moves_from,
};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, RngCore};

/// One tier of the policy.
pub trait Strategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Proposes a legal move for `color`, or `None` to defer to the next tier.
    fn propose(&self, board: &Board, color: Color, rng: &mut dyn RngCore) -> Option<Move>;
}

/// Plays the check-escape search result whenever `color` is in check.
#[derive(Debug, Clone, Copy, Default)]
pub struct EscapeCheck;

impl Strategy for EscapeCheck {
    fn name(&self) -> &'static str {
        "escape-check"
    }

    fn propose(&self, board: &Board, color: Color, _rng: &mut dyn RngCore) -> Option<Move> {
        if is_in_check(board, color) {
            find_escape(board, color)
        } else {
            None
        }
    }
}

/// Runs the inner strategy only with the given probability.
#[derive(Debug, Clone)]
pub struct Chance<S> {
    probability: f64,
    inner: S,
}

impl<S: Strategy> Chance<S> {
    /// Wraps `inner`, rejecting a probability outside `[0, 1]`.
    pub fn new(probability: f64, inner: S) -> Result<Self, BotConfigError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(BotConfigError::ProbabilityOutOfRange {
                name: "probability",
                value: probability,
            });
        }
        Ok(Self::unchecked(probability, inner))
    }

    /// The probability must already lie in `[0, 1]`.
    pub(crate) fn unchecked(probability: f64, inner: S) -> Self {
        Chance { probability, inner }
    }
}

impl<S: Strategy> Strategy for Chance<S> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn propose(&self, board: &Board, color: Color, rng: &mut dyn RngCore) -> Option<Move> {
        if rng.random_bool(self.probability) {
            self.inner.propose(board, color, rng)
        } else {
            None
        }
    }
}

/// Picks uniformly among all captures, with no regard for recapture.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCapture;

impl Strategy for RandomCapture {
    fn name(&self) -> &'static str {
        "random-capture"
    }

    fn propose(&self, board: &Board, color: Color, rng: &mut dyn RngCore) -> Option<Move> {
        // A legal move never lands on a friendly piece, so any occupant is a victim.
        let captures: Vec<Move> = legal_moves(board, color)
            .into_iter()
            .filter(|m| !board.is_empty(m.to()))
            .collect();
        captures.choose(rng).copied()
    }
}

/// Picks uniformly among pawn pushes, double steps and pawn captures.
#[derive(Debug, Clone, Copy, Default)]
pub struct PawnPush;

impl Strategy for PawnPush {
    fn name(&self) -> &'static str {
        "pawn-push"
    }

    fn propose(&self, board: &Board, color: Color, rng: &mut dyn RngCore) -> Option<Move> {
        let moves: Vec<Move> = board
            .pieces(color)
            .filter(|(_, piece)| piece.kind == PieceKind::Pawn)
            .flat_map(|(from, _)| legal_moves_from(board, from))
            .collect();
        moves.choose(rng).copied()
    }
}

/// Piece kinds visited by [`Wander`]; the king is left out.
const WANDER_KINDS: [PieceKind; 5] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
];

/// Aimless piece shuffling.
///
/// Kinds are visited in a random order. Each piece scans a square
/// neighbourhood whose radius is drawn per piece; every legal move found may
/// be played on the spot, and after each kind the search may settle on one
/// of the moves collected so far.
#[derive(Debug, Clone)]
pub struct Wander {
    short_radius: i32,
    long_radius: i32,
    short_radius_probability: f64,
    impulsive_probability: f64,
    settle_probability: f64,
    capacity: usize,
}

impl Wander {
    /// Builds a wander tier from `config` after validating it.
    pub fn new(config: &BotConfig) -> Result<Self, BotConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// `config` must already have passed [`BotConfig::validate`].
    pub(crate) fn from_valid(config: &BotConfig) -> Self {
        Wander {
            short_radius: config.short_radius.into(),
            long_radius: config.long_radius.into(),
            short_radius_probability: config.short_radius_probability,
            impulsive_probability: config.impulsive_probability,
            settle_probability: config.settle_probability,
            capacity: config.wander_capacity,
        }
    }
}

impl Default for Wander {
    fn default() -> Self {
        Wander::from_valid(&BotConfig::default())
    }
}

impl Strategy for Wander {
    fn name(&self) -> &'static str {
        "wander"
    }

    fn propose(&self, board: &Board, color: Color, rng: &mut dyn RngCore) -> Option<Move> {
        let mut kinds = WANDER_KINDS;
        kinds.shuffle(rng);

        let mut collected = Vec::with_capacity(self.capacity);
        for kind in kinds {
            for (from, _) in board.pieces(color).filter(|(_, p)| p.kind == kind) {
                let radius = if rng.random_bool(self.short_radius_probability) {
                    self.short_radius
                } else {
                    self.long_radius
                };
                for dr in -radius..=radius {
                    for df in -radius..=radius {
                        if (dr, df) == (0, 0) {
                            continue;
                        }
                        let Some(to) = from.offset(dr, df) else {
                            continue;
                        };
                        let mov = Move::new(from, to);
                        if !is_legal(board, mov) {
                            continue;
                        }
                        if collected.len() < self.capacity {
                            collected.push(mov);
                        }
                        if rng.random_bool(self.impulsive_probability) {
                            return Some(mov);
                        }
                    }
                }
            }
            if !collected.is_empty() && rng.random_bool(self.settle_probability) {
                return collected.choose(rng).copied();
            }
        }
        collected.choose(rng).copied()
    }
}

/// The first legal move in row-major scan order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstLegal;

impl Strategy for FirstLegal {
    fn name(&self) -> &'static str {
        "first-legal"
    }

    fn propose(&self, board: &Board, color: Color, _rng: &mut dyn RngCore) -> Option<Move> {
        first_legal_move(board, color)
    }
}

/// Greedy one-ply choice by [`score_move`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BestScore;

impl Strategy for BestScore {
    fn name(&self) -> &'static str {
        "best-score"
    }

    fn propose(&self, board: &Board, color: Color, _rng: &mut dyn RngCore) -> Option<Move> {
        let mut best: Option<(Move, i32)> = None;
        for mov in legal_moves(board, color) {
            let score = score_move(board, mov);
            // Strict comparison keeps the earliest move on ties.
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((mov, score));
            }
        }
        best.map(|(mov, _)| mov)
    }
}

/// Scores a move for the greedy tier.
///
/// The value of the captured piece (if any) plus a centralisation bonus of
/// `6 - manhattan(to, (3, 3))`, which is 6 on d5 and falls to -2 on h1.
pub fn score_move(board: &Board, mov: Move) -> i32 {
    let captured = board.piece_at(mov.to()).map_or(0, |p| p.kind.value());
    let to = mov.to();
    let distance = (to.rank() as i32 - 3).abs() + (to.file() as i32 - 3).abs();
    captured + 6 - distance
}
