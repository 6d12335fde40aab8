//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Injected, seeded random source only, drawn in a fixed order
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod paddle;
pub mod rng;
pub mod state;
pub mod tick;

pub use ball::{Ball, PaddleHits, PaddleSide};
pub use collision::{segment_intersection, segments_intersect, vertical_edge};
pub use paddle::{Paddle, PaddleAction};
pub use rng::{GameRng, RandomSource};
pub use state::{GamePhase, GameState, LEFT, NUM_AGENTS, Observation, RIGHT};
pub use tick::{TickInput, TickOutcome, tick};
