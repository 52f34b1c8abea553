//! Tunable constants of the move-selection policy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors found when validating a [`BotConfig`].
#[derive(Debug, Error, PartialEq)]
pub enum BotConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    #[error("wander_capacity must be at least 1")]
    ZeroCapacity,
}

/// Probabilities and search radii used by the policy.
///
/// Every field has a default, so a partial TOML table overrides only the
/// keys it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Chance of skipping the capture and pawn tiers in favour of a random wander.
    pub distraction_probability: f64,
    /// Neighbourhood radius used most of the time while wandering.
    pub short_radius: u8,
    /// Neighbourhood radius used otherwise.
    pub long_radius: u8,
    /// Chance, per piece, of using `short_radius`.
    pub short_radius_probability: f64,
    /// Chance of playing a legal move the moment it is found.
    pub impulsive_probability: f64,
    /// Chance, after each piece kind, of settling on a move collected so far.
    pub settle_probability: f64,
    /// Maximum number of moves collected during one wander.
    pub wander_capacity: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            distraction_probability: 0.2,
            short_radius: 2,
            long_radius: 4,
            short_radius_probability: 0.7,
            impulsive_probability: 0.3,
            settle_probability: 0.4,
            wander_capacity: 200,
        }
    }
}

impl BotConfig {
    /// Checks that every probability lies in `[0, 1]` and the capacity is non-zero.
    pub fn validate(&self) -> Result<(), BotConfigError> {
        let probabilities = [
            ("distraction_probability", self.distraction_probability),
            ("short_radius_probability", self.short_radius_probability),
            ("impulsive_probability", self.impulsive_probability),
            ("settle_probability", self.settle_probability),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(BotConfigError::ProbabilityOutOfRange { name, value });
            }
        }
        if self.wander_capacity == 0 {
            return Err(BotConfigError::ZeroCapacity);
        }
        Ok(())
    }
}
