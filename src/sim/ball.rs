//! The ball: motion, paddle hits and wall bounces

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::{segments_intersect, vertical_edge};
use super::paddle::Paddle;
use super::rng::RandomSource;
use crate::consts::*;

/// Which paddle the ball struck during an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleSide {
    Left,
    Right,
}

/// Paddles struck during one update; both only in degenerate geometry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleHits {
    pub left: bool,
    pub right: bool,
}

impl PaddleHits {
    pub fn any(&self) -> bool {
        self.left || self.right
    }

    pub fn contains(&self, side: PaddleSide) -> bool {
        match side {
            PaddleSide::Left => self.left,
            PaddleSide::Right => self.right,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: DVec2,
    /// Position at the start of the current step (start of the swept segment)
    pub prev_pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    /// Base speed, recomputed from the arena height every step
    pub speed: f64,
    /// Arena width and height
    pub arena: DVec2,
}

impl Ball {
    /// New ball at `pos` heading up and to the right at `speed`
    pub fn new(radius: f64, speed: f64, pos: DVec2, arena: DVec2) -> Self {
        Self {
            pos,
            prev_pos: pos,
            vel: DVec2::new(speed, -speed),
            radius,
            speed,
            arena,
        }
    }

    /// Advance one step. Draws from `rng` only when a paddle is hit.
    pub fn update<R: RandomSource + ?Sized>(
        &mut self,
        left: &Paddle,
        right: &Paddle,
        dt: f64,
        rng: &mut R,
    ) -> PaddleHits {
        self.pos += self.vel * dt;

        let mut hits = PaddleHits::default();

        if self.pos.x <= left.pos.x + left.width {
            let (top, bottom) = vertical_edge(
                DVec2::new(left.pos.x + left.width / 2.0, left.pos.y),
                left.height,
            );
            if segments_intersect(self.prev_pos, self.pos, top, bottom) {
                self.pos.x = self.pos.x.max(0.0);
                self.vel.x = -(self.vel.x + self.speed * PADDLE_HIT_BOOST);
                self.vel.y += left.vel.y * LEFT_PADDLE_TRANSFER;
                self.pos.x += self.radius;
                hits.left = true;
            }
        }

        if self.pos.x >= right.pos.x - right.width {
            let (top, bottom) = vertical_edge(
                DVec2::new(right.pos.x - right.width / 2.0, right.pos.y),
                right.height,
            );
            if segments_intersect(self.prev_pos, self.pos, top, bottom) {
                self.pos.x = self.pos.x.min(self.arena.x);
                self.vel.x = -(self.vel.x + self.speed * PADDLE_HIT_BOOST);
                self.vel.y += right.vel.y * RIGHT_PADDLE_TRANSFER;
                self.pos.x -= self.radius;
                hits.right = true;
            }
        }

        // Small jitter so rallies don't settle into a fixed loop
        if hits.any() {
            self.vel.y += rng.uniform() * (2.0 * PADDLE_HIT_JITTER) - PADDLE_HIT_JITTER;
        }

        if self.pos.y - self.radius <= 0.0 {
            self.vel.y *= WALL_RESTITUTION;
            self.pos.y += WALL_NUDGE;
        }

        if self.pos.y + self.radius >= self.arena.y {
            self.vel.y *= WALL_RESTITUTION;
            self.pos.y -= WALL_NUDGE;
        }

        self.prev_pos = self.pos;

        hits
    }

    /// Whether the ball has left the arena through the left goal line
    pub fn past_left_goal(&self) -> bool {
        self.pos.x <= 0.0
    }

    /// Whether the ball has left the arena through the right goal line
    pub fn past_right_goal(&self) -> bool {
        self.pos.x >= self.arena.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedSource;

    const W: f64 = 64.0;
    const H: f64 = 48.0;

    fn paddles() -> (Paddle, Paddle) {
        (
            Paddle::new(19.2, 1.0, 7.0, DVec2::new(4.0, H / 2.0), H),
            Paddle::new(19.2, 1.0, 7.0, DVec2::new(W - 4.0, H / 2.0), H),
        )
    }

    fn ball_at(pos: DVec2, vel: DVec2) -> Ball {
        let mut ball = Ball::new(1.0, 36.0, pos, DVec2::new(W, H));
        ball.vel = vel;
        ball
    }

    #[test]
    fn test_free_flight() {
        let (left, right) = paddles();
        let mut rng = ScriptedSource::constant(0.5);
        let mut ball = ball_at(DVec2::new(32.0, 24.0), DVec2::new(10.0, 5.0));

        let hits = ball.update(&left, &right, 0.1, &mut rng);

        assert!(!hits.any());
        assert!((ball.pos - DVec2::new(33.0, 24.5)).length() < 1e-12);
        assert_eq!(ball.prev_pos, ball.pos);
        assert_eq!(rng.draws(), 0, "no draw without a paddle hit");
    }

    #[test]
    fn test_top_wall_bounce() {
        let (left, right) = paddles();
        let mut rng = ScriptedSource::constant(0.5);
        // y = radius - 0.5, moving up
        let mut ball = ball_at(DVec2::new(32.0, 0.5), DVec2::new(0.0, -5.0));

        ball.update(&left, &right, 0.0, &mut rng);

        assert!((ball.vel.y - 4.95).abs() < 1e-12);
        assert!((ball.pos.y - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_bottom_wall_bounce() {
        let (left, right) = paddles();
        let mut rng = ScriptedSource::constant(0.5);
        let mut ball = ball_at(DVec2::new(32.0, H - 0.5), DVec2::new(0.0, 5.0));

        ball.update(&left, &right, 0.0, &mut rng);

        assert!((ball.vel.y + 4.95).abs() < 1e-12);
        assert!((ball.pos.y - (H - 1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_left_paddle_hit() {
        let (mut left, right) = paddles();
        left.vel.y = 0.5;
        // 0.5 draws zero jitter
        let mut rng = ScriptedSource::constant(0.5);
        let mut ball = ball_at(DVec2::new(8.0, 24.0), DVec2::new(-60.0, 0.0));

        let hits = ball.update(&left, &right, 0.1, &mut rng);

        assert_eq!(
            hits,
            PaddleHits {
                left: true,
                right: false
            }
        );
        // -(-60 + 36 * 0.05)
        assert!((ball.vel.x - 58.2).abs() < 1e-12);
        assert!((ball.vel.y - 1.0).abs() < 1e-12);
        // Path ends at x = 2, then nudged by the radius
        assert!((ball.pos.x - 3.0).abs() < 1e-12);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_right_paddle_hit_uses_small_transfer() {
        let (left, mut right) = paddles();
        right.vel.y = 0.5;
        let mut rng = ScriptedSource::constant(0.5);
        let mut ball = ball_at(DVec2::new(56.0, 24.0), DVec2::new(60.0, 0.0));

        let hits = ball.update(&left, &right, 0.1, &mut rng);

        assert!(hits.contains(PaddleSide::Right));
        assert!(!hits.contains(PaddleSide::Left));
        assert!((ball.vel.x + 61.8).abs() < 1e-12);
        assert!((ball.vel.y - 0.003).abs() < 1e-12);
        assert!((ball.pos.x - 61.0).abs() < 1e-12);
    }

    #[test]
    fn test_hit_jitter_bounds() {
        let (left, right) = paddles();
        for (u, expected) in [(0.0, -0.0005), (0.999_999, 0.000_499_999)] {
            let mut rng = ScriptedSource::constant(u);
            let mut ball = ball_at(DVec2::new(8.0, 24.0), DVec2::new(-60.0, 0.0));
            ball.update(&left, &right, 0.1, &mut rng);
            assert!((ball.vel.y - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_miss_above_paddle() {
        let (left, right) = paddles();
        let mut rng = ScriptedSource::constant(0.5);
        // Paddle spans y 20.5..27.5
        let mut ball = ball_at(DVec2::new(8.0, 10.0), DVec2::new(-60.0, 0.0));

        let hits = ball.update(&left, &right, 0.1, &mut rng);

        assert!(!hits.any());
        assert!(ball.vel.x < 0.0);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_no_tunneling_at_high_speed() {
        let (left, right) = paddles();
        let mut rng = ScriptedSource::constant(0.5);
        // Crosses the whole left half of the arena, and the paddle, in one step
        let mut ball = ball_at(DVec2::new(30.0, 24.0), DVec2::new(-H * 20.0, 0.0));

        let hits = ball.update(&left, &right, 0.1, &mut rng);

        assert_eq!(
            hits,
            PaddleHits {
                left: true,
                right: false
            }
        );
        assert!(ball.vel.x > 0.0);
        assert!(!ball.past_left_goal());
    }

    #[test]
    fn test_goal_lines() {
        let mut ball = ball_at(DVec2::new(0.0, 24.0), DVec2::ZERO);
        assert!(ball.past_left_goal());
        ball.pos.x = W;
        assert!(ball.past_right_goal());
        ball.pos.x = W / 2.0;
        assert!(!ball.past_left_goal() && !ball.past_right_goal());
    }
}
