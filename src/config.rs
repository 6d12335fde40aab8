//! Game and environment configuration
//!
//! `PongConfig` describes the arena and scoring, `EnvConfig` describes how the
//! step driver advances it. Both round-trip through JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::percent_round_int;

/// Speed presets for curriculum learning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedPreset {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl SpeedPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreset::Easy => "Easy",
            SpeedPreset::Normal => "Normal",
            SpeedPreset::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(SpeedPreset::Easy),
            "normal" | "default" => Some(SpeedPreset::Normal),
            "hard" => Some(SpeedPreset::Hard),
            _ => None,
        }
    }

    /// Paddle speed as a fraction of arena height per second
    pub fn players_speed_ratio(&self) -> f64 {
        match self {
            SpeedPreset::Easy => 0.5,
            SpeedPreset::Normal => DEFAULT_PLAYERS_SPEED_RATIO,
            SpeedPreset::Hard => 0.3,
        }
    }

    /// Ball speed as a fraction of arena height per second
    pub fn ball_speed_ratio(&self) -> f64 {
        match self {
            SpeedPreset::Easy => 0.5,
            SpeedPreset::Normal => DEFAULT_BALL_SPEED_RATIO,
            SpeedPreset::Hard => 1.0,
        }
    }
}

/// Reward added to each agent's score when a point ends
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardValues {
    /// Reward for the agent that scored
    pub positive: f64,
    /// Reward for the agent that conceded
    pub negative: f64,
}

impl Default for RewardValues {
    fn default() -> Self {
        Self {
            positive: 1.0,
            negative: -1.0,
        }
    }
}

/// Arena and episode configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PongConfig {
    pub width: f64,
    pub height: f64,
    pub players_speed_ratio: f64,
    pub ball_speed_ratio: f64,
    /// Points played before the episode is terminal
    pub max_score: u32,
    pub rewards: RewardValues,
    /// Step rate the game insists on, if any
    pub allowed_fps: Option<u32>,
}

impl Default for PongConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            players_speed_ratio: DEFAULT_PLAYERS_SPEED_RATIO,
            ball_speed_ratio: DEFAULT_BALL_SPEED_RATIO,
            max_score: DEFAULT_MAX_SCORE,
            rewards: RewardValues::default(),
            allowed_fps: None,
        }
    }
}

impl PongConfig {
    pub fn new(
        width: f64,
        height: f64,
        players_speed_ratio: f64,
        ball_speed_ratio: f64,
        max_score: u32,
    ) -> Self {
        Self {
            width,
            height,
            players_speed_ratio,
            ball_speed_ratio,
            max_score,
            ..Self::default()
        }
    }

    /// Create a config from a speed preset (default arena)
    pub fn from_preset(preset: SpeedPreset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a speed preset (updates both speed ratios)
    pub fn apply_preset(&mut self, preset: SpeedPreset) {
        self.players_speed_ratio = preset.players_speed_ratio();
        self.ball_speed_ratio = preset.ball_speed_ratio();
    }

    pub fn ball_radius(&self) -> f64 {
        percent_round_int(self.height, BALL_RADIUS_PCT)
    }

    pub fn paddle_width(&self) -> f64 {
        percent_round_int(self.width, PADDLE_WIDTH_PCT)
    }

    pub fn paddle_height(&self) -> f64 {
        percent_round_int(self.height, PADDLE_HEIGHT_PCT)
    }

    pub fn paddle_dist_to_wall(&self) -> f64 {
        percent_round_int(self.width, PADDLE_DIST_TO_WALL_PCT)
    }

    /// Reject configurations the physics cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositiveDimension { field, value });
            }
            // Also catches infinity
            if value > MAX_ARENA_DIMENSION {
                return Err(ConfigError::DimensionTooLarge {
                    field,
                    value,
                    max: MAX_ARENA_DIMENSION,
                });
            }
        }
        validate_speed_ratios(self.players_speed_ratio, self.ball_speed_ratio)?;
        if self.max_score == 0 {
            return Err(ConfigError::ZeroMaxScore);
        }
        for (what, size) in [
            ("ball radius", self.ball_radius()),
            ("paddle width", self.paddle_width()),
            ("paddle height", self.paddle_height()),
        ] {
            if size <= 0.0 {
                return Err(ConfigError::DegenerateGeometry {
                    width: self.width,
                    height: self.height,
                    what,
                });
            }
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Game config saved to {}", path.display());
        Ok(())
    }
}

/// Both speed ratios must be finite and strictly positive
pub fn validate_speed_ratios(players: f64, ball: f64) -> Result<(), ConfigError> {
    for (field, value) in [("players_speed_ratio", players), ("ball_speed_ratio", ball)] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::NonPositiveRatio { field, value });
        }
    }
    Ok(())
}

/// Step driver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Simulated frames per second; each tick advances `1000 / fps` ms
    pub fps: u32,
    /// Times each action is repeated per `act` call
    pub frame_skip: u32,
    /// Physics ticks per repeated action
    pub num_steps: u32,
    /// Seed for the shared random source
    pub seed: u64,
    /// Rasterize a frame after every tick
    pub display_screen: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            frame_skip: 1,
            num_steps: 1,
            seed: DEFAULT_SEED,
            display_screen: false,
        }
    }
}

impl EnvConfig {
    /// Check the driver settings against the game's mandated rate
    pub fn validate(&self, game: &PongConfig) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        if self.frame_skip == 0 || self.num_steps == 0 {
            return Err(ConfigError::ZeroFrameSkip);
        }
        match game.allowed_fps {
            Some(required) if required != self.fps => Err(ConfigError::FpsMismatch {
                required,
                given: self.fps,
            }),
            _ => Ok(()),
        }
    }

    /// Milliseconds advanced per physics tick
    pub fn tick_ms(&self) -> f64 {
        1000.0 / f64::from(self.fps)
    }
}
