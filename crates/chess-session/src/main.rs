//! Self-play runner.
//!
//! Starts one session with the bot disabled and lets two tasks, one per
//! color, submit moves to it concurrently until each game ends or hits the
//! ply limit.

use anyhow::Context;
use chess_bot::Bot;
use chess_core::Color;
use chess_engine::{BotSettings, Difficulty, GameState, Winner};
use chess_session::{SessionConfig, SessionError, SessionHandle};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Runs bot-versus-bot games through a single game session.
#[derive(Parser)]
#[command(name = "chess-session")]
#[command(about = "Runs bot-versus-bot games through a single game session")]
struct Args {
    /// Path to the session configuration
    #[arg(long, default_value = "session.toml")]
    config: PathBuf,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    games: u32,

    /// Half-moves after which an unfinished game is abandoned
    #[arg(long, default_value = "300")]
    max_plies: u32,

    /// Level of the White player (beginner or intermediate)
    #[arg(long, default_value = "beginner", value_parser = parse_difficulty)]
    white: Difficulty,

    /// Level of the Black player (beginner or intermediate)
    #[arg(long, default_value = "intermediate", value_parser = parse_difficulty)]
    black: Difficulty,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    match s.to_ascii_lowercase().as_str() {
        "beginner" => Ok(Difficulty::Beginner),
        "intermediate" => Ok(Difficulty::Intermediate),
        other => Err(format!("unknown difficulty '{other}'")),
    }
}

#[derive(Debug, Default)]
struct Tally {
    white: u32,
    black: u32,
    draws: u32,
    unfinished: u32,
}

impl Tally {
    fn record(&mut self, winner: Option<Winner>) {
        match winner {
            Some(Winner::White) => self.white += 1,
            Some(Winner::Black) => self.black += 1,
            Some(Winner::Draw) => self.draws += 1,
            None => self.unfinished += 1,
        }
    }
}

/// Plays `color` until the game ends or reaches `max_plies`.
async fn play_side(
    session: SessionHandle,
    color: Color,
    bot: Bot,
    mut rng: StdRng,
    max_plies: u32,
) -> anyhow::Result<()> {
    let mut updates = session.subscribe();
    loop {
        let snapshot = updates.borrow_and_update().clone();
        if snapshot.finished || snapshot.moves >= max_plies {
            return Ok(());
        }
        if snapshot.turn == color {
            let game = GameState::try_from(&snapshot)?;
            let Some(mov) = bot.select_move(game.board(), color, &mut rng) else {
                return Ok(());
            };
            match session.submit(mov).await {
                Ok(_) => {}
                Err(SessionError::Game(err)) => tracing::warn!(%color, %mov, "move refused: {err}"),
                Err(SessionError::Closed) => return Ok(()),
            }
        }
        if updates.changed().await.is_err() {
            return Ok(());
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = SessionConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    tracing::info!("Config: {:?}", args.config);
    tracing::info!("Games: {}, max plies: {}", args.games, args.max_plies);
    tracing::info!("White: {}, Black: {}", args.white.label(), args.black.label());

    let session = SessionHandle::spawn(&config)?;
    session
        .configure(BotSettings {
            enabled: false,
            ..config.bot
        })
        .await?;

    let base_seed = config.seed.unwrap_or_else(rand::random);
    let mut tally = Tally::default();

    for game in 0..args.games {
        session.reset().await?;
        let seed = base_seed.wrapping_add(u64::from(game).wrapping_mul(2));
        let white = tokio::spawn(play_side(
            session.clone(),
            Color::White,
            Bot::new(args.white, config.policy.clone())?,
            StdRng::seed_from_u64(seed),
            args.max_plies,
        ));
        let black = tokio::spawn(play_side(
            session.clone(),
            Color::Black,
            Bot::new(args.black, config.policy.clone())?,
            StdRng::seed_from_u64(seed.wrapping_add(1)),
            args.max_plies,
        ));
        white.await??;
        black.await??;

        let result = session.snapshot().await?;
        let winner = GameState::try_from(&result)?.winner();
        tracing::info!(
            game = game + 1,
            moves = result.moves,
            "Result: {}",
            winner.map_or("unfinished".to_string(), |w| w.to_string())
        );
        tally.record(winner);
    }

    tracing::info!(
        "Final tally: White {} / Black {} / Draws {} / Unfinished {}",
        tally.white,
        tally.black,
        tally.draws,
        tally.unfinished
    );
    session.shutdown().await?;
    Ok(())
}
