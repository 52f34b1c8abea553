//! Move selection for the automated opponent.
//!
//! The policy is a prioritized list of [`Strategy`] tiers, each of which may
//! propose a move or defer to the next. All probabilities and radii live in
//! [`BotConfig`], and randomness is injected, so a seeded RNG makes every
//! choice reproducible:
//!
//! ```
//! use chess_bot::{select_bot_move, Bot, BotConfig};
//! use chess_core::{Board, Color};
//! use chess_engine::{is_legal, Difficulty};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let board = Board::startpos();
//! let mut rng = StdRng::seed_from_u64(1);
//! let mov = select_bot_move(&board, Color::Black, Difficulty::Beginner, &mut rng).unwrap();
//! assert!(is_legal(&board, mov));
//!
//! let bot = Bot::new(Difficulty::Intermediate, BotConfig::default()).unwrap();
//! assert!(bot.select_move(&board, Color::Black, &mut rng).is_some());
//! ```

mod config;
mod policy;
pub mod strategy;

pub use config::{BotConfig, BotConfigError};
pub use policy::{select_bot_move, Bot};
pub use strategy::{score_move, Strategy};
