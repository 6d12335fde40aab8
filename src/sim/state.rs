//! Arena and episode state
//!
//! Owns both paddles and the ball. Everything here is deterministic given the
//! random source handed to each operation.

use bytemuck::{Pod, Zeroable};
use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::paddle::{Paddle, PaddleAction};
use super::rng::RandomSource;
use crate::config::{PongConfig, RewardValues, validate_speed_ratios};
use crate::error::{ConfigError, PongError};
use crate::renderer::{Rect, Scene};

/// Number of agents (one per paddle)
pub const NUM_AGENTS: usize = 2;

/// Index of the left paddle's agent
pub const LEFT: usize = 0;
/// Index of the right paddle's agent
pub const RIGHT: usize = 1;

/// Where the episode stands after the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball in play
    Playing,
    /// A point ended during the last tick; paddles were not moved
    PointScored,
    /// `score_count == max_score`
    Terminal,
}

/// Symbolic observation of the arena
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Observation {
    pub player1_y: f64,
    pub player1_velocity: f64,
    pub player2_y: f64,
    pub player2_velocity: f64,
    pub ball_x: f64,
    pub ball_y: f64,
    pub ball_velocity_x: f64,
    pub ball_velocity_y: f64,
}

impl Observation {
    pub const LEN: usize = 8;

    pub const FIELD_NAMES: [&'static str; Self::LEN] = [
        "player1_y",
        "player1_velocity",
        "player2_y",
        "player2_velocity",
        "ball_x",
        "ball_y",
        "ball_velocity_x",
        "ball_velocity_y",
    ];

    pub fn as_array(&self) -> [f64; Self::LEN] {
        bytemuck::cast(*self)
    }

    /// Flat named mapping, in `FIELD_NAMES` order
    pub fn named(&self) -> [(&'static str, f64); Self::LEN] {
        let values = self.as_array();
        std::array::from_fn(|i| (Self::FIELD_NAMES[i], values[i]))
    }

    /// View a batch of observations as one flat buffer
    pub fn flatten(batch: &[Observation]) -> &[f64] {
        bytemuck::cast_slice(batch)
    }
}

/// Complete arena/episode state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: PongConfig,
    pub ball: Ball,
    /// Left paddle first
    pub paddles: [Paddle; NUM_AGENTS],
    /// Points played this episode
    pub score_count: u32,
    /// Cumulative reward per agent this episode
    pub scores: [f64; NUM_AGENTS],
    /// Actions applied on the last tick
    pub actions: [PaddleAction; NUM_AGENTS],
    /// Accelerations derived from `actions` on the last tick
    pub accelerations: [f64; NUM_AGENTS],
    pub phase: GamePhase,
}

impl GameState {
    /// Build the initial arena. Consumes no randomness.
    ///
    /// The config is assumed valid (see `PongConfig::validate`).
    pub fn new(config: PongConfig) -> Self {
        let (ball, paddles) = Self::spawn(&config);
        Self {
            config,
            ball,
            paddles,
            score_count: 0,
            scores: [0.0; NUM_AGENTS],
            actions: [PaddleAction::Noop; NUM_AGENTS],
            accelerations: [0.0; NUM_AGENTS],
            phase: GamePhase::Playing,
        }
    }

    fn spawn(config: &PongConfig) -> (Ball, [Paddle; NUM_AGENTS]) {
        let (width, height) = (config.width, config.height);
        let center = DVec2::new(width / 2.0, height / 2.0);

        let ball = Ball::new(
            config.ball_radius(),
            config.ball_speed_ratio * height,
            center,
            DVec2::new(width, height),
        );

        let speed = config.players_speed_ratio * height;
        let dist = config.paddle_dist_to_wall();
        let paddle = |x: f64| {
            Paddle::new(
                speed,
                config.paddle_width(),
                config.paddle_height(),
                DVec2::new(x, center.y),
                height,
            )
        };

        (ball, [paddle(dist), paddle(width - dist)])
    }

    /// Rebuild paddles and ball and clear the scores. Consumes no randomness.
    pub fn init(&mut self) {
        *self = Self::new(self.config.clone());
    }

    /// Full episode reset: fresh arena, ball launched in a random direction
    pub fn reset<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.init();
        let direction = if rng.uniform() > 0.5 { 1.0 } else { -1.0 };
        self.reset_ball(direction, rng);
    }

    /// Re-centre the ball horizontally and relaunch it toward `direction`
    ///
    /// Only `x` is re-centred; the ball keeps its height.
    pub fn reset_ball<R: RandomSource + ?Sized>(&mut self, direction: f64, rng: &mut R) {
        let speed = self.ball.speed;
        self.ball.pos.x = self.config.width / 2.0;
        self.ball.vel.x = speed * direction;
        self.ball.vel.y = rng.uniform() * speed - speed * 0.5;
    }

    /// Recompute paddle and ball speeds from the current ratios
    pub fn refresh_speeds(&mut self) {
        let height = self.config.height;
        for paddle in &mut self.paddles {
            paddle.speed = self.config.players_speed_ratio * height;
        }
        self.ball.speed = self.config.ball_speed_ratio * height;
    }

    /// Change difficulty; takes effect on the next tick
    ///
    /// Rejected ratios leave the current ones in place.
    pub fn set_speed_ratios(&mut self, players: f64, ball: f64) -> Result<(), ConfigError> {
        validate_speed_ratios(players, ball)?;
        self.config.players_speed_ratio = players;
        self.config.ball_speed_ratio = ball;
        Ok(())
    }

    /// Override the reward pair used by the next scoring events
    pub fn set_rewards(&mut self, rewards: RewardValues) {
        self.config.rewards = rewards;
    }

    pub fn is_terminal(&self) -> bool {
        self.score_count == self.config.max_score
    }

    pub fn scores(&self) -> [f64; NUM_AGENTS] {
        self.scores
    }

    /// Scripted baseline: chase the ball vertically. Never returns `Noop`.
    pub fn expert_policy(&self, agent: usize) -> Result<PaddleAction, PongError> {
        let paddle = self.paddles.get(agent).ok_or(PongError::InvalidAgent(agent))?;
        Ok(if paddle.pos.y > self.ball.pos.y {
            PaddleAction::Up
        } else {
            PaddleAction::Down
        })
    }

    pub fn observation(&self) -> Observation {
        let [p1, p2] = &self.paddles;
        Observation {
            player1_y: p1.pos.y,
            player1_velocity: p1.vel.y,
            player2_y: p2.pos.y,
            player2_velocity: p2.vel.y,
            ball_x: self.ball.pos.x,
            ball_y: self.ball.pos.y,
            ball_velocity_x: self.ball.vel.x,
            ball_velocity_y: self.ball.vel.y,
        }
    }

    /// Read-only geometry for renderers
    pub fn scene(&self) -> Scene {
        let rect = |p: &Paddle| Rect {
            center: p.pos,
            size: DVec2::new(p.width, p.height),
        };
        Scene {
            width: self.config.width,
            height: self.config.height,
            ball_center: self.ball.pos,
            ball_radius: self.ball.radius,
            paddles: [rect(&self.paddles[LEFT]), rect(&self.paddles[RIGHT])],
        }
    }
}
