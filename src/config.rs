//! Arena configuration
//!
//! Immutable for the duration of an episode. Loaded from JSON files; any field
//! missing from the file falls back to the default arena.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Who controls the right paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnemyMode {
    /// Scripted tracker that occasionally fails to move
    #[default]
    Computer,
    /// Displacement supplied by the driver every tick
    Human,
}

impl EnemyMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyMode::Computer => "computer",
            EnemyMode::Human => "human",
        }
    }
}

impl fmt::Display for EnemyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnemyMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "computer" | "cpu" => Ok(EnemyMode::Computer),
            "human" => Ok(EnemyMode::Human),
            other => Err(ConfigError::Invalid {
                field: "enemy_mode",
                reason: format!("unknown mode `{other}`"),
            }),
        }
    }
}

/// Arena dimensions and tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub width: f32,
    pub height: f32,
    /// Paddle length along the vertical axis
    pub paddle_h: f32,
    /// Paddle depth; also the collision band at each edge of the arena
    pub paddle_w: f32,
    /// Paddle displacement per tick
    pub paddle_speed: f32,
    /// Normalization reference for velocities; also caps the paddle boosts
    pub max_ball_speed: f32,
    /// Probability that the computer opponent skips its move on a tick
    pub opponent_error_rate: f32,
    pub enemy_mode: EnemyMode,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            paddle_h: PADDLE_HEIGHT,
            paddle_w: PADDLE_WIDTH,
            paddle_speed: PADDLE_SPEED,
            max_ball_speed: MAX_BALL_SPEED,
            opponent_error_rate: OPPONENT_ERROR_RATE,
            enemy_mode: EnemyMode::Computer,
        }
    }
}

impl EnvConfig {
    /// Default arena with a human-controlled right paddle
    pub fn versus_human() -> Self {
        Self {
            enemy_mode: EnemyMode::Human,
            ..Self::default()
        }
    }

    /// Parse a JSON document and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "Loaded config from {} ({}x{}, enemy {})",
            path.display(),
            config.width,
            config.height,
            config.enemy_mode
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("paddle_h", self.paddle_h),
            ("paddle_w", self.paddle_w),
            ("paddle_speed", self.paddle_speed),
            ("max_ball_speed", self.max_ball_speed),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive and finite, got {value}"),
                });
            }
        }

        if self.paddle_h > self.height {
            return Err(ConfigError::Invalid {
                field: "paddle_h",
                reason: format!("{} exceeds arena height {}", self.paddle_h, self.height),
            });
        }
        if 2.0 * self.paddle_w >= self.width {
            return Err(ConfigError::Invalid {
                field: "paddle_w",
                reason: format!("paddles overlap in an arena {} wide", self.width),
            });
        }
        if !(0.0..=1.0).contains(&self.opponent_error_rate) {
            return Err(ConfigError::Invalid {
                field: "opponent_error_rate",
                reason: format!("must be within [0, 1], got {}", self.opponent_error_rate),
            });
        }
        Ok(())
    }

    /// Highest point (smallest y) a paddle center may reach
    #[inline]
    pub fn paddle_min_y(&self) -> f32 {
        self.paddle_h / 2.0
    }

    /// Lowest point (largest y) a paddle center may reach
    #[inline]
    pub fn paddle_max_y(&self) -> f32 {
        self.height - self.paddle_h / 2.0
    }

    /// Clamp a paddle center into the arena
    ///
    /// Panics if the paddle is taller than the arena; [`EnvConfig::validate`]
    /// rules that out.
    #[inline]
    pub fn clamp_paddle(&self, y: f32) -> f32 {
        y.clamp(self.paddle_min_y(), self.paddle_max_y())
    }
}
