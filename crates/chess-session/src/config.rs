//! Configuration file loading for the game session.
//!
//! Settings come from a TOML file (`session.toml` by default). Every key is
//! optional, and a missing file yields the defaults:
//!
//! ```toml
//! seed = 42
//!
//! [bot]
//! enabled = true
//! color = "black"
//! difficulty = "intermediate"
//!
//! [policy]
//! distraction_probability = 0.1
//! ```

use chess_bot::{BotConfig, BotConfigError};
use chess_engine::BotSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The `[policy]` table holds out-of-range values.
    #[error("Invalid bot policy: {0}")]
    InvalidPolicy(#[from] BotConfigError),
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Seed for the bot's random source. Unset means a fresh seed per session.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Number of pending requests the session queues before callers wait.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Whether the bot plays, which side, and at what level.
    #[serde(default)]
    pub bot: BotSettings,
    /// Probabilities and radii of the move-selection policy.
    #[serde(default)]
    pub policy: BotConfig,
}

fn default_channel_capacity() -> usize {
    32
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            seed: None,
            channel_capacity: default_channel_capacity(),
            bot: BotSettings::default(),
            policy: BotConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Loads the configuration from `path`.
    ///
    /// A missing file yields [`SessionConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it is not valid TOML, or
    /// [`ConfigError::InvalidPolicy`] if a policy probability is out of range.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses and validates a TOML document.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(content)?;
        config.policy.validate()?;
        Ok(config)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("session.toml")
    }
}
