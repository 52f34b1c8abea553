//! Chess rules on top of [`chess_core`].
//!
//! This crate provides:
//! - [`is_legal`] - per-piece move legality with path-clear checks
//! - [`is_in_check`] - whether a king could be captured
//! - [`classify`] - checkmate / stalemate / ongoing for the side to move
//! - [`find_escape`] - a move that lifts check, if one exists
//! - [`GameState`] - turn order, move counter and bot settings for a game
//! - [`GameSnapshot`] - the serializable shape of a game
//!
//! # Rules
//!
//! Legality is geometric: a move is legal when the piece can reach the
//! destination on the current board. Moves that leave the mover's own king
//! attacked are not filtered out, so checkmate and stalemate only arise
//! when the side to move has no geometric move at all. There is no en
//! passant or promotion, and a king stepping two squares sideways is
//! accepted without verifying castling conditions.
//!
//! # Example
//!
//! ```
//! use chess_engine::{GameState, TerminalState};
//!
//! let mut game = GameState::new();
//! assert_eq!(game.play_uci("e2e4"), Ok(TerminalState::Ongoing));
//! assert_eq!(game.move_count(), 1);
//!
//! let snapshot = game.snapshot();
//! assert_eq!(snapshot.board[4][4], "♙");
//! ```

mod check;
mod escape;
mod game;
mod legality;
pub mod movegen;
pub mod rules;
mod snapshot;

pub use check::is_in_check;
pub use escape::find_escape;
pub use game::{BotSettings, Difficulty, GameError, GameState};
pub use legality::{is_legal, is_legal_coords, path_clear};
pub use movegen::{first_legal_move, has_legal_move, legal_moves, legal_moves_from};
pub use rules::{classify, TerminalState, Winner};
pub use snapshot::{GameSnapshot, Mode, SnapshotError};
