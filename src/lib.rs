//! Pong Env - A deterministic two-paddle Pong simulation for RL agents
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, ball, collisions, episode state)
//! - `env`: Step driver (discrete actions in, per-agent reward out)
//! - `config`: Game/environment configuration and speed presets
//! - `renderer`: Geometry snapshot and software frame buffer
//! - `error`: Configuration and action errors

pub mod config;
pub mod env;
pub mod error;
pub mod renderer;
pub mod sim;

pub use config::{EnvConfig, PongConfig, RewardValues, SpeedPreset};
pub use env::PongEnv;
pub use error::{ConfigError, PongError};

/// Game configuration constants
pub mod consts {
    /// Default arena dimensions
    pub const DEFAULT_WIDTH: f64 = 64.0;
    pub const DEFAULT_HEIGHT: f64 = 48.0;
    /// Largest accepted arena side, in pixels
    pub const MAX_ARENA_DIMENSION: f64 = 4096.0;

    /// Default speed ratios (multiplied by arena height every step)
    pub const DEFAULT_PLAYERS_SPEED_RATIO: f64 = 0.4;
    pub const DEFAULT_BALL_SPEED_RATIO: f64 = 0.75;

    /// Points played before the episode ends
    pub const DEFAULT_MAX_SCORE: u32 = 11;

    /// Geometry as a fraction of arena size
    pub const BALL_RADIUS_PCT: f64 = 0.03;
    pub const PADDLE_WIDTH_PCT: f64 = 0.023;
    pub const PADDLE_HEIGHT_PCT: f64 = 0.15;
    pub const PADDLE_DIST_TO_WALL_PCT: f64 = 0.0625;

    /// Paddle velocity multiplier applied once per update (not dt-scaled)
    pub const PADDLE_DAMPING: f64 = 0.9;

    /// Ball x speed boost on paddle hit, as a fraction of base speed
    pub const PADDLE_HIT_BOOST: f64 = 0.05;
    /// Paddle y velocity transferred to the ball on a left paddle hit
    pub const LEFT_PADDLE_TRANSFER: f64 = 2.0;
    /// Paddle y velocity transferred to the ball on a right paddle hit
    pub const RIGHT_PADDLE_TRANSFER: f64 = 0.006;
    /// Half-width of the y velocity jitter added after a paddle hit
    pub const PADDLE_HIT_JITTER: f64 = 0.0005;

    /// Wall bounce restitution (sign flip included)
    pub const WALL_RESTITUTION: f64 = -0.99;
    /// Distance the ball is pushed back from a wall after bouncing
    pub const WALL_NUDGE: f64 = 1.0;

    /// Default environment settings
    pub const DEFAULT_FPS: u32 = 30;
    pub const DEFAULT_SEED: u64 = 24;
}

/// Scale `size` by `pct` and round to the nearest integer (ties to even)
#[inline]
pub fn percent_round_int(size: f64, pct: f64) -> f64 {
    (size * pct).round_ties_even()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_round_int_default_geometry() {
        assert_eq!(percent_round_int(48.0, consts::BALL_RADIUS_PCT), 1.0);
        assert_eq!(percent_round_int(64.0, consts::PADDLE_WIDTH_PCT), 1.0);
        assert_eq!(percent_round_int(48.0, consts::PADDLE_HEIGHT_PCT), 7.0);
        assert_eq!(percent_round_int(64.0, consts::PADDLE_DIST_TO_WALL_PCT), 4.0);
    }

    #[test]
    fn test_percent_round_int_ties_to_even() {
        assert_eq!(percent_round_int(5.0, 0.5), 2.0);
        assert_eq!(percent_round_int(7.0, 0.5), 4.0);
    }
}
