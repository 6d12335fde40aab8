//! Error types
//!
//! The physics step itself is total and never fails. Errors surface only at the
//! configuration boundary and when an agent submits an out-of-range action.

use thiserror::Error;

/// Top-level error type for the environment.
#[derive(Debug, Error)]
pub enum PongError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid action {action} for agent {agent} (expected 0, 1 or 2)")]
    InvalidAction { agent: usize, action: usize },

    #[error("Invalid agent {0} (expected 0 or 1)")]
    InvalidAgent(usize),

    #[error("Was asked to return state vector for game that does not support it")]
    StateUnsupported,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid {field}: {value} (must be > 0)")]
    NonPositiveDimension { field: &'static str, value: f64 },

    #[error("Invalid {field}: {value} (must be at most {max})")]
    DimensionTooLarge {
        field: &'static str,
        value: f64,
        max: f64,
    },

    #[error("Invalid {field}: {value} (must be finite and > 0)")]
    NonPositiveRatio { field: &'static str, value: f64 },

    #[error("max_score must be at least 1")]
    ZeroMaxScore,

    #[error("Arena {width}x{height} is too small: {what} rounds to zero")]
    DegenerateGeometry {
        width: f64,
        height: f64,
        what: &'static str,
    },

    #[error("Game requires {required}fps, was given {given}")]
    FpsMismatch { required: u32, given: u32 },

    #[error("fps must be at least 1")]
    ZeroFps,

    #[error("frame_skip and num_steps must be at least 1")]
    ZeroFrameSkip,
}
