//! Rendering adapter
//!
//! The simulation exposes a `Scene` snapshot; renderers consume it. Nothing in
//! `sim` depends on a pixel format.

pub mod frame;

pub use frame::FrameBuffer;

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle given by its centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn min(&self) -> DVec2 {
        self.center - self.size / 2.0
    }

    pub fn max(&self) -> DVec2 {
        self.center + self.size / 2.0
    }
}

/// Read-only geometry of one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub ball_center: DVec2,
    pub ball_radius: f64,
    /// Left paddle first
    pub paddles: [Rect; 2],
}

/// Anything that can draw a `Scene`
pub trait Renderer {
    fn draw(&mut self, scene: &Scene);
}

/// Colors for game elements (RGB8)
pub mod colors {
    pub const BACKGROUND: [u8; 3] = [0, 0, 0];
    pub const PADDLE: [u8; 3] = [255, 255, 255];
    pub const BALL: [u8; 3] = [255, 255, 255];
}
