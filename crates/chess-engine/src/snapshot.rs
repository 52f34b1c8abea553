//! Serializable game snapshot.
//!
//! This is the shape a transport layer sends to clients: an 8x8 grid of
//! piece glyphs (empty string for an empty square) plus the scalar game
//! fields. Converting a [`GameState`] to a [`GameSnapshot`] and back is
//! lossless.

use crate::game::{BotSettings, Difficulty, GameState};
use crate::rules::TerminalState;
use chess_core::{Board, Color, Piece, Square};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when turning a snapshot back into a game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("unknown piece glyph '{glyph}' at {square}")]
    UnknownGlyph { glyph: String, square: Square },

    #[error("unknown winner label: '{0}'")]
    UnknownWinner(String),

    #[error("finished flag ({finished}) disagrees with winner '{winner}'")]
    InconsistentResult { finished: bool, winner: String },
}

/// Whether the second player is a person or the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Friend,
    Bot,
}

/// Wire representation of a [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Row-major grid, row 0 being Black's back rank.
    pub board: [[String; 8]; 8],
    pub turn: Color,
    pub moves: u32,
    pub finished: bool,
    /// "white", "black", "draw", or "" while the game goes on.
    pub winner: String,
    pub mode: Mode,
    pub level: Difficulty,
    #[serde(default = "default_bot_color")]
    pub bot_color: Color,
}

fn default_bot_color() -> Color {
    BotSettings::default().color
}

fn cell(piece: Option<Piece>) -> String {
    piece.map(|p| p.glyph().to_string()).unwrap_or_default()
}

fn parse_cell(text: &str, square: Square) -> Result<Option<Piece>, SnapshotError> {
    if text.is_empty() {
        return Ok(None);
    }
    let mut chars = text.chars();
    match (chars.next().and_then(Piece::from_glyph), chars.next()) {
        (Some(piece), None) => Ok(Some(piece)),
        _ => Err(SnapshotError::UnknownGlyph {
            glyph: text.to_string(),
            square,
        }),
    }
}

fn parse_winner(label: &str) -> Result<TerminalState, SnapshotError> {
    match label {
        "" => Ok(TerminalState::Ongoing),
        "white" => Ok(TerminalState::Checkmate {
            loser: Color::Black,
        }),
        "black" => Ok(TerminalState::Checkmate {
            loser: Color::White,
        }),
        "draw" => Ok(TerminalState::Stalemate),
        other => Err(SnapshotError::UnknownWinner(other.to_string())),
    }
}

impl GameState {
    /// Captures the game in its wire shape.
    pub fn snapshot(&self) -> GameSnapshot {
        let board = self.board();
        let grid = std::array::from_fn(|rank| {
            std::array::from_fn(|file| {
                let square = Square::new(rank as u8, file as u8);
                cell(square.and_then(|sq| board.piece_at(sq)))
            })
        });
        let settings = self.settings();
        GameSnapshot {
            board: grid,
            turn: self.turn(),
            moves: self.move_count(),
            finished: self.is_terminal(),
            winner: self
                .winner()
                .map(|w| w.label().to_string())
                .unwrap_or_default(),
            mode: if settings.enabled {
                Mode::Bot
            } else {
                Mode::Friend
            },
            level: settings.difficulty,
            bot_color: settings.color,
        }
    }
}

impl TryFrom<&GameSnapshot> for GameState {
    type Error = SnapshotError;

    fn try_from(snapshot: &GameSnapshot) -> Result<Self, Self::Error> {
        let mut board = Board::empty();
        for sq in Square::all() {
            let text = &snapshot.board[sq.rank() as usize][sq.file() as usize];
            board.set(sq, parse_cell(text, sq)?);
        }

        let state = parse_winner(&snapshot.winner)?;
        if state.is_terminal() != snapshot.finished {
            return Err(SnapshotError::InconsistentResult {
                finished: snapshot.finished,
                winner: snapshot.winner.clone(),
            });
        }

        let settings = BotSettings {
            enabled: snapshot.mode == Mode::Bot,
            color: snapshot.bot_color,
            difficulty: snapshot.level,
        };
        Ok(GameState::restore(
            board,
            snapshot.turn,
            snapshot.moves,
            state,
            settings,
        ))
    }
}

impl TryFrom<GameSnapshot> for GameState {
    type Error = SnapshotError;

    fn try_from(snapshot: GameSnapshot) -> Result<Self, Self::Error> {
        GameState::try_from(&snapshot)
    }
}
