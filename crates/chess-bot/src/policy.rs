//! The prioritized tier list.

use crate::config::{BotConfig, BotConfigError};
use crate::strategy::{
    BestScore, Chance, EscapeCheck, FirstLegal, PawnPush, RandomCapture, Strategy, Wander,
};
use chess_core::{Board, Color, Move};
use chess_engine::Difficulty;
use rand::{Rng, RngCore};
use tracing::trace;

/// A move selector for one difficulty level.
///
/// Both levels try, in order, to escape check and (with
/// `distraction_probability`) to wander at random. Beginner then falls
/// through captures, pawn pushes, another wander and the first legal move;
/// Intermediate takes the best-scoring move instead.
pub struct Bot {
    difficulty: Difficulty,
    tiers: Vec<Box<dyn Strategy>>,
}

impl Bot {
    /// Builds a bot after validating `config`.
    pub fn new(difficulty: Difficulty, config: BotConfig) -> Result<Self, BotConfigError> {
        config.validate()?;
        Ok(Self::build(difficulty, &config))
    }

    /// Builds a bot with the default configuration.
    pub fn with_defaults(difficulty: Difficulty) -> Self {
        Self::build(difficulty, &BotConfig::default())
    }

    /// `config` must already be valid.
    fn build(difficulty: Difficulty, config: &BotConfig) -> Self {
        let wander = Wander::from_valid(config);
        let mut tiers: Vec<Box<dyn Strategy>> = vec![
            Box::new(EscapeCheck),
            Box::new(Chance::unchecked(
                config.distraction_probability,
                wander.clone(),
            )),
        ];
        match difficulty {
            Difficulty::Beginner => {
                tiers.push(Box::new(RandomCapture));
                tiers.push(Box::new(PawnPush));
                tiers.push(Box::new(wander));
                tiers.push(Box::new(FirstLegal));
            }
            Difficulty::Intermediate => tiers.push(Box::new(BestScore)),
        }
        Bot { difficulty, tiers }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Chooses a move for `color`.
    ///
    /// Returns `None` only when `color` has no legal move at all.
    pub fn select_move(&self, board: &Board, color: Color, rng: &mut impl Rng) -> Option<Move> {
        let rng: &mut dyn RngCore = rng;
        self.tiers.iter().find_map(|tier| {
            let mov = tier.propose(board, color, rng)?;
            trace!(tier = tier.name(), %mov, %color, "bot move selected");
            Some(mov)
        })
    }
}

impl std::fmt::Debug for Bot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.tiers.iter().map(|t| t.name()).collect();
        f.debug_struct("Bot")
            .field("difficulty", &self.difficulty)
            .field("tiers", &names)
            .finish()
    }
}

/// Chooses a move for `color` with the default configuration.
pub fn select_bot_move(
    board: &Board,
    color: Color,
    difficulty: Difficulty,
    rng: &mut impl Rng,
) -> Option<Move> {
    Bot::with_defaults(difficulty).select_move(board, color, rng)
}
