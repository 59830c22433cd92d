//! Tunable game settings, loadable from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of one 60 Hz reference frame, used by [`Motion::FrameScaled`].
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

/// How raven velocities are integrated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    /// Velocity is applied once per tick whatever the elapsed time.
    #[default]
    PerTick,
    /// Velocity is expressed per reference frame and scaled by elapsed time.
    FrameScaled,
}

impl Motion {
    /// Multiplier applied to a velocity for a tick of `delta_ms`.
    pub fn step_scale(self, delta_ms: f64) -> f32 {
        match self {
            Motion::PerTick => 1.0,
            Motion::FrameScaled => (delta_ms / REFERENCE_FRAME_MS) as f32,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Milliseconds between raven spawns.
    pub raven_interval_ms: f64,
    /// Milliseconds each explosion frame stays on screen.
    pub explosion_frame_interval_ms: f64,
    pub motion: Motion,
    /// Fixed RNG seed; `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            raven_interval_ms: 500.0,
            explosion_frame_interval_ms: 200.0,
            motion: Motion::PerTick,
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl GameConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let intervals = [
            ("raven_interval_ms", self.raven_interval_ms),
            ("explosion_frame_interval_ms", self.explosion_frame_interval_ms),
        ];
        for (name, value) in intervals {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number of milliseconds, got {value}"
                )));
            }
        }
        Ok(())
    }
}
