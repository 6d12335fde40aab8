//! Paddles and the discrete actions that drive them

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::PADDLE_DAMPING;
use crate::error::PongError;

/// Discrete per-agent action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum PaddleAction {
    #[default]
    Noop = 0,
    Up = 1,
    Down = 2,
}

impl PaddleAction {
    pub const ALL: [PaddleAction; 3] = [PaddleAction::Noop, PaddleAction::Up, PaddleAction::Down];

    /// Validate a raw action index for `agent`
    pub fn from_index(agent: usize, action: usize) -> Result<Self, PongError> {
        match action {
            0 => Ok(PaddleAction::Noop),
            1 => Ok(PaddleAction::Up),
            2 => Ok(PaddleAction::Down),
            _ => Err(PongError::InvalidAction { agent, action }),
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Acceleration applied to a paddle moving at `speed` (screen y grows downward)
    pub fn acceleration(self, speed: f64) -> f64 {
        match self {
            PaddleAction::Noop => 0.0,
            PaddleAction::Up => -speed,
            PaddleAction::Down => speed,
        }
    }
}

/// One agent's paddle. Only moves vertically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Centre of the paddle
    pub pos: DVec2,
    /// Only `y` is ever non-zero
    pub vel: DVec2,
    pub width: f64,
    pub height: f64,
    /// Acceleration magnitude for up/down, recomputed every step
    pub speed: f64,
    /// Height of the arena the paddle is clamped to
    pub arena_height: f64,
}

impl Paddle {
    pub fn new(speed: f64, width: f64, height: f64, pos: DVec2, arena_height: f64) -> Self {
        Self {
            pos,
            vel: DVec2::ZERO,
            width,
            height,
            speed,
            arena_height,
        }
    }

    /// Integrate one step under `acceleration`, then clamp to the arena
    pub fn update(&mut self, acceleration: f64, dt: f64) {
        self.vel.y += acceleration * dt;
        // Discrete damping: applied once per call whatever dt is
        self.vel.y *= PADDLE_DAMPING;

        self.pos.y += self.vel.y;

        let half = self.height / 2.0;
        if self.pos.y - half <= 0.0 {
            self.pos.y = half;
            self.vel.y = 0.0;
        }
        if self.pos.y + half >= self.arena_height {
            self.pos.y = self.arena_height - half;
            self.vel.y = 0.0;
        }
    }

    pub fn top(&self) -> f64 {
        self.pos.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.pos.y + self.height / 2.0
    }
}
