//! Game session management.
//!
//! One task owns the [`GameState`] and processes requests strictly one at a
//! time, so validating a move, applying it, letting the bot reply and
//! classifying the result happen as a single step that no other request can
//! interleave with. Callers talk to the task through a cloneable
//! [`SessionHandle`].

use crate::config::SessionConfig;
use chess_bot::{Bot, BotConfigError};
use chess_core::Move;
use chess_engine::{BotSettings, Difficulty, GameError, GameSnapshot, GameState, TerminalState};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

/// Errors returned to session callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The game refused the request.
    #[error(transparent)]
    Game(#[from] GameError),
    /// The session task has stopped.
    #[error("session has shut down")]
    Closed,
}

/// Result of an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The submitted move.
    pub played: Move,
    /// The bot's answer, if it was the bot's turn afterwards.
    pub bot_reply: Option<Move>,
    /// Classification after both moves.
    pub state: TerminalState,
}

enum Command {
    Snapshot(oneshot::Sender<GameSnapshot>),
    Submit {
        mov: Move,
        reply: oneshot::Sender<Result<MoveOutcome, GameError>>,
    },
    Reset(oneshot::Sender<GameSnapshot>),
    Configure {
        settings: BotSettings,
        reply: oneshot::Sender<GameSnapshot>,
    },
    Shutdown(oneshot::Sender<()>),
}

/// Handle to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    commands: mpsc::Sender<Command>,
    updates: watch::Receiver<GameSnapshot>,
}

impl SessionHandle {
    /// Starts a session at the initial position using the configured bot settings.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(config: &SessionConfig) -> Result<Self, BotConfigError> {
        Self::spawn_with(GameState::with_settings(config.bot), config)
    }

    /// Starts a session around an existing game. The game's own bot settings
    /// are kept; `config` supplies the policy, seed and queue size.
    pub fn spawn_with(game: GameState, config: &SessionConfig) -> Result<Self, BotConfigError> {
        let beginner = Bot::new(Difficulty::Beginner, config.policy.clone())?;
        let intermediate = Bot::new(Difficulty::Intermediate, config.policy.clone())?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        let (commands, receiver) = mpsc::channel(config.channel_capacity.max(1));
        let (publisher, updates) = watch::channel(game.snapshot());
        let mut session = Session {
            game,
            beginner,
            intermediate,
            rng,
            publisher,
        };
        session.advance_bot();
        session.publish();
        tokio::spawn(session.run(receiver));

        Ok(SessionHandle { commands, updates })
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Closed)
    }

    /// Returns the current game in its wire shape.
    pub async fn snapshot(&self) -> Result<GameSnapshot, SessionError> {
        self.request(Command::Snapshot).await
    }

    /// Plays a move and, if the bot is now to move, its reply.
    pub async fn submit(&self, mov: Move) -> Result<MoveOutcome, SessionError> {
        self.request(|reply| Command::Submit { mov, reply })
            .await?
            .map_err(SessionError::from)
    }

    /// Like [`submit`](Self::submit), for a move in UCI notation.
    pub async fn submit_uci(&self, uci: &str) -> Result<MoveOutcome, SessionError> {
        let mov =
            Move::from_uci(uci).ok_or_else(|| GameError::InvalidNotation(uci.to_string()))?;
        self.submit(mov).await
    }

    /// Restores the initial position, keeping the bot settings.
    pub async fn reset(&self) -> Result<GameSnapshot, SessionError> {
        self.request(Command::Reset).await
    }

    /// Changes who the bot plays and how strongly.
    pub async fn configure(&self, settings: BotSettings) -> Result<GameSnapshot, SessionError> {
        self.request(|reply| Command::Configure { settings, reply })
            .await
    }

    /// Returns a receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.updates.clone()
    }

    /// Stops the session task. Later requests on any handle fail with
    /// [`SessionError::Closed`].
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.request(Command::Shutdown).await
    }
}

struct Session {
    game: GameState,
    beginner: Bot,
    intermediate: Bot,
    rng: StdRng,
    publisher: watch::Sender<GameSnapshot>,
}

impl Session {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        info!(turn = %self.game.turn(), "session started");
        while let Some(command) = commands.recv().await {
            match command {
                Command::Snapshot(reply) => {
                    let _ = reply.send(self.game.snapshot());
                }
                Command::Submit { mov, reply } => {
                    let result = self.submit(mov);
                    self.publish();
                    let _ = reply.send(result);
                }
                Command::Reset(reply) => {
                    self.game.reset();
                    info!(settings = ?self.game.settings(), "game reset");
                    self.advance_bot();
                    self.publish();
                    let _ = reply.send(self.game.snapshot());
                }
                Command::Configure { settings, reply } => {
                    self.game.configure(settings);
                    info!(?settings, "bot reconfigured");
                    self.advance_bot();
                    self.publish();
                    let _ = reply.send(self.game.snapshot());
                }
                Command::Shutdown(reply) => {
                    info!("session shutting down");
                    let _ = reply.send(());
                    break;
                }
            }
        }
        debug!("session task finished");
    }

    fn submit(&mut self, mov: Move) -> Result<MoveOutcome, GameError> {
        let turn = self.game.turn();
        if let Err(err) = self.game.play(mov) {
            warn!(%mov, %turn, error = %err, "move rejected");
            return Err(err);
        }
        info!(%mov, %turn, moves = self.game.move_count(), "move accepted");

        let bot_reply = self.advance_bot();
        let state = self.game.state();
        if let Some(winner) = state.winner() {
            info!(%winner, moves = self.game.move_count(), "game over");
        }
        Ok(MoveOutcome {
            played: mov,
            bot_reply,
            state,
        })
    }

    /// Lets the bot move if it is enabled and on turn.
    fn advance_bot(&mut self) -> Option<Move> {
        if !self.game.is_bot_turn() {
            return None;
        }
        let settings = self.game.settings();
        let bot = match settings.difficulty {
            Difficulty::Beginner => &self.beginner,
            Difficulty::Intermediate => &self.intermediate,
        };
        let mov = bot.select_move(self.game.board(), settings.color, &mut self.rng)?;
        match self.game.play(mov) {
            Ok(_) => {
                debug!(%mov, level = settings.difficulty.label(), "bot replied");
                Some(mov)
            }
            Err(err) => {
                warn!(%mov, error = %err, "bot move refused");
                None
            }
        }
    }

    fn publish(&self) {
        self.publisher.send_replace(self.game.snapshot());
    }
}
