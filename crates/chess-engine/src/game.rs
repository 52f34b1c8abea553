//! Game state management.
//!
//! The [`GameState`] struct owns the board and everything a running game
//! needs besides it:
//! - Side to move and a half-move counter
//! - Whether the game has ended, and how
//! - Whether an automated opponent plays, which side, and how strongly

use crate::legality::is_legal;
use crate::rules::{classify, TerminalState, Winner};
use chess_core::{Board, Color, Fen, FenError, Move};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for game operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// The game has already ended.
    #[error("game has already ended")]
    GameOver,
    /// The origin holds a piece of the side not on move.
    #[error("not your turn: {expected} to move")]
    NotYourTurn { expected: Color },
    /// The move is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(Move),
    /// The move text could not be parsed.
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),
}

/// Strength of the automated opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Tiered heuristics with deliberate blunders.
    #[default]
    Beginner,
    /// Greedy one-ply scoring of captures and centralisation.
    Intermediate,
}

impl Difficulty {
    /// Returns the wire label.
    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
        }
    }
}

/// Automated opponent configuration carried by a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSettings {
    /// Whether the bot plays at all.
    #[serde(default)]
    pub enabled: bool,
    /// The side the bot plays.
    #[serde(default = "default_bot_color")]
    pub color: Color,
    #[serde(default)]
    pub difficulty: Difficulty,
}

fn default_bot_color() -> Color {
    Color::Black
}

impl Default for BotSettings {
    fn default() -> Self {
        BotSettings {
            enabled: false,
            color: default_bot_color(),
            difficulty: Difficulty::default(),
        }
    }
}

impl BotSettings {
    /// Settings for playing against the bot as White.
    pub fn against(difficulty: Difficulty) -> Self {
        BotSettings {
            enabled: true,
            color: Color::Black,
            difficulty,
        }
    }
}

/// A game in progress.
///
/// Moves go through [`GameState::play`], which enforces turn order and
/// legality and classifies the resulting position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Color,
    move_count: u32,
    state: TerminalState,
    settings: BotSettings,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a game at the standard starting position, bot disabled.
    pub fn new() -> Self {
        Self::with_settings(BotSettings::default())
    }

    /// Creates a game at the standard starting position with the given bot settings.
    pub fn with_settings(settings: BotSettings) -> Self {
        GameState {
            board: Board::startpos(),
            turn: Color::White,
            move_count: 0,
            state: TerminalState::Ongoing,
            settings,
        }
    }

    /// Creates a game from a FEN string.
    ///
    /// The position is classified immediately, so a FEN describing a
    /// finished game yields a finished `GameState`.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fen = Fen::parse(fen)?;
        Ok(Self::from_parts(
            fen.board,
            fen.side_to_move,
            0,
            BotSettings::default(),
        ))
    }

    /// Assembles a game from its pieces and classifies it.
    pub fn from_parts(board: Board, turn: Color, move_count: u32, settings: BotSettings) -> Self {
        GameState {
            board,
            turn,
            move_count,
            state: classify(&board, turn),
            settings,
        }
    }

    pub(crate) fn restore(
        board: Board,
        turn: Color,
        move_count: u32,
        state: TerminalState,
        settings: BotSettings,
    ) -> Self {
        GameState {
            board,
            turn,
            move_count,
            state,
            settings,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the number of half-moves played.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Returns the classification of the current position.
    pub fn state(&self) -> TerminalState {
        self.state
    }

    /// Returns true if the game has ended.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Returns the outcome if the game has ended.
    pub fn winner(&self) -> Option<Winner> {
        self.state.winner()
    }

    /// Returns the bot settings.
    pub fn settings(&self) -> BotSettings {
        self.settings
    }

    /// Replaces the bot settings. Takes effect from the next move on.
    pub fn configure(&mut self, settings: BotSettings) {
        self.settings = settings;
    }

    /// Returns true if the bot is enabled and should move now.
    pub fn is_bot_turn(&self) -> bool {
        self.settings.enabled && self.turn == self.settings.color && !self.is_terminal()
    }

    /// Restores the starting position. Bot settings are kept.
    pub fn reset(&mut self) {
        *self = Self::with_settings(self.settings);
    }

    /// Plays a move for the side to move.
    ///
    /// On success the board is updated, the turn passes, the counter is
    /// incremented and the new position is classified for the side now to
    /// move. On error nothing changes.
    pub fn play(&mut self, mov: Move) -> Result<TerminalState, GameError> {
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }
        match self.board.piece_at(mov.from()) {
            Some(piece) if piece.color != self.turn => {
                return Err(GameError::NotYourTurn { expected: self.turn });
            }
            _ => {}
        }
        if !is_legal(&self.board, mov) {
            return Err(GameError::IllegalMove(mov));
        }

        self.board.apply(mov);
        self.turn = self.turn.opposite();
        self.move_count += 1;
        self.state = classify(&self.board, self.turn);
        Ok(self.state)
    }

    /// Plays a move given in UCI notation.
    pub fn play_uci(&mut self, uci: &str) -> Result<TerminalState, GameError> {
        let mov = Move::from_uci(uci).ok_or_else(|| GameError::InvalidNotation(uci.to_string()))?;
        self.play(mov)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::{Piece, PieceKind, Square};

    fn mv(uci: &str) -> Move {
        Move::from_uci(uci).unwrap()
    }

    #[test]
    fn new_game() {
        let game = GameState::new();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.move_count(), 0);
        assert!(!game.is_terminal());
        assert_eq!(game.winner(), None);
        assert_eq!(*game.board(), Board::startpos());
    }

    #[test]
    fn play_flips_turn_and_counts() {
        let mut game = GameState::new();
        assert_eq!(game.play(mv("e2e4")), Ok(TerminalState::Ongoing));
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.move_count(), 1);
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(
            game.board().piece_at(e4),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );
    }

    #[test]
    fn wrong_side_rejected() {
        let mut game = GameState::new();
        assert_eq!(
            game.play(mv("e7e5")),
            Err(GameError::NotYourTurn {
                expected: Color::White
            })
        );
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn illegal_move_rejected_without_change() {
        let mut game = GameState::new();
        let before = game.clone();
        assert_eq!(game.play(mv("e2e5")), Err(GameError::IllegalMove(mv("e2e5"))));
        assert_eq!(game.play(mv("e4e5")), Err(GameError::IllegalMove(mv("e4e5"))));
        assert_eq!(game, before);
    }

    #[test]
    fn mate_ends_the_game() {
        // The knight drops to f2 and the walled-in black king has no move.
        let mut game = GameState::from_fen("K7/8/8/8/4N3/8/6pp/5ppk w").unwrap();
        let state = game.play(mv("e4f2")).unwrap();
        assert_eq!(state, TerminalState::Checkmate { loser: Color::Black });
        assert_eq!(game.winner(), Some(Winner::White));
        assert_eq!(game.play(mv("a8a7")), Err(GameError::GameOver));
    }

    #[test]
    fn stalemate_from_fen() {
        let game = GameState::from_fen("K7/8/8/8/8/8/6pp/5ppk b").unwrap();
        assert!(game.is_terminal());
        assert_eq!(game.winner(), Some(Winner::Draw));
    }

    #[test]
    fn reset_keeps_settings() {
        let settings = BotSettings::against(Difficulty::Intermediate);
        let mut game = GameState::with_settings(settings);
        game.play(mv("d2d4")).unwrap();
        game.reset();
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(*game.board(), Board::startpos());
        assert_eq!(game.settings(), settings);
    }

    #[test]
    fn bot_turn() {
        let mut game = GameState::with_settings(BotSettings::against(Difficulty::Beginner));
        assert!(!game.is_bot_turn());
        game.play(mv("e2e4")).unwrap();
        assert!(game.is_bot_turn());

        game.configure(BotSettings::default());
        assert!(!game.is_bot_turn());
    }

    #[test]
    fn play_uci() {
        let mut game = GameState::new();
        assert!(game.play_uci("g1f3").is_ok());
        assert_eq!(
            game.play_uci("zz"),
            Err(GameError::InvalidNotation("zz".to_string()))
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(GameError::GameOver.to_string(), "game has already ended");
        assert_eq!(
            GameError::NotYourTurn {
                expected: Color::Black
            }
            .to_string(),
            "not your turn: Black to move"
        );
        assert_eq!(
            GameError::IllegalMove(mv("e2e5")).to_string(),
            "illegal move: e2e5"
        );
    }

    #[test]
    fn settings_deserialize_with_defaults() {
        let s: BotSettings = serde_json::from_str(r#"{"enabled": true}"#).unwrap();
        assert!(s.enabled);
        assert_eq!(s.color, Color::Black);
        assert_eq!(s.difficulty, Difficulty::Beginner);
    }
}
