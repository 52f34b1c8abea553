//! A chess game session with an optional automated opponent.
//!
//! [`SessionHandle::spawn`] starts a task that exclusively owns one game.
//! Every request goes through that task, so a move, the bot's reply and the
//! game-end check are applied together. [`SessionConfig`] is read from TOML.

pub mod config;
pub mod session;

pub use config::{ConfigError, SessionConfig};
pub use session::{MoveOutcome, SessionError, SessionHandle};
