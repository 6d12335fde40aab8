//! Software frame buffer
//!
//! Rasterizes a `Scene` into an RGB8 image: black background, white ball and
//! paddles. A pixel is lit when its centre falls inside a shape.

use glam::DVec2;

use super::{Rect, Renderer, Scene, colors};

/// Luminance weights for grayscale conversion
const LUMA: [f64; 3] = [0.21, 0.72, 0.07];

#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    /// Row-major, `height × width × 3`
    pixels: Vec<u8>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 3],
        }
    }

    /// Frame sized to cover a scene's arena
    pub fn for_scene(scene: &Scene) -> Self {
        Self::new(scene.width.ceil() as usize, scene.height.ceil() as usize)
    }

    pub fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn rgb(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// One luminance byte per pixel, row-major
    pub fn grayscale(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(3)
            .map(|px| {
                let y: f64 = px.iter().zip(LUMA).map(|(&c, w)| f64::from(c) * w).sum();
                y.round().clamp(0.0, 255.0) as u8
            })
            .collect()
    }

    fn fill(&mut self, color: [u8; 3]) {
        for px in self.pixels.chunks_exact_mut(3) {
            px.copy_from_slice(&color);
        }
    }

    /// Pixel index range covering `[lo, hi]` along one axis
    fn span(lo: f64, hi: f64, limit: usize) -> std::ops::Range<usize> {
        let start = lo.floor().max(0.0) as usize;
        let end = (hi.ceil().max(0.0) as usize).min(limit);
        start.min(end)..end
    }

    fn fill_where(&mut self, min: DVec2, max: DVec2, color: [u8; 3], inside: impl Fn(DVec2) -> bool) {
        for y in Self::span(min.y, max.y, self.height) {
            for x in Self::span(min.x, max.x, self.width) {
                if inside(DVec2::new(x as f64 + 0.5, y as f64 + 0.5)) {
                    let i = (y * self.width + x) * 3;
                    self.pixels[i..i + 3].copy_from_slice(&color);
                }
            }
        }
    }

    fn draw_rect(&mut self, rect: &Rect, color: [u8; 3]) {
        let (min, max) = (rect.min(), rect.max());
        self.fill_where(min, max, color, |p| {
            p.x >= min.x && p.x < max.x && p.y >= min.y && p.y < max.y
        });
    }

    fn draw_circle(&mut self, center: DVec2, radius: f64, color: [u8; 3]) {
        let extent = DVec2::splat(radius);
        self.fill_where(center - extent, center + extent, color, |p| {
            p.distance_squared(center) <= radius * radius
        });
    }
}

impl Renderer for FrameBuffer {
    fn draw(&mut self, scene: &Scene) {
        self.fill(colors::BACKGROUND);
        for paddle in &scene.paddles {
            self.draw_rect(paddle, colors::PADDLE);
        }
        self.draw_circle(scene.ball_center, scene.ball_radius, colors::BALL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> Scene {
        Scene {
            width: 20.0,
            height: 10.0,
            ball_center: DVec2::new(10.0, 5.0),
            ball_radius: 1.0,
            paddles: [
                Rect {
                    center: DVec2::new(2.0, 5.0),
                    size: DVec2::new(2.0, 4.0),
                },
                Rect {
                    center: DVec2::new(18.0, 5.0),
                    size: DVec2::new(2.0, 4.0),
                },
            ],
        }
    }

    #[test]
    fn test_draws_shapes_on_black() {
        let mut frame = FrameBuffer::for_scene(&scene());
        frame.draw(&scene());

        assert_eq!(frame.dims(), (20, 10));
        assert_eq!(frame.pixel(0, 0), colors::BACKGROUND);
        // Left paddle covers x 1..3, y 3..7
        assert_eq!(frame.pixel(1, 3), colors::PADDLE);
        assert_eq!(frame.pixel(2, 6), colors::PADDLE);
        assert_eq!(frame.pixel(3, 5), colors::BACKGROUND);
        assert_eq!(frame.pixel(17, 4), colors::PADDLE);
        // Ball centre pixels
        assert_eq!(frame.pixel(9, 4), colors::BALL);
        assert_eq!(frame.pixel(10, 5), colors::BALL);
        assert_eq!(frame.pixel(12, 5), colors::BACKGROUND);
    }

    #[test]
    fn test_redraw_clears_previous_frame() {
        let mut frame = FrameBuffer::for_scene(&scene());
        frame.draw(&scene());
        let mut moved = scene();
        moved.ball_center = DVec2::new(5.0, 5.0);
        frame.draw(&moved);
        assert_eq!(frame.pixel(10, 5), colors::BACKGROUND);
        assert_eq!(frame.pixel(5, 5), colors::BALL);
    }

    #[test]
    fn test_shapes_outside_frame_are_clipped() {
        let mut s = scene();
        s.ball_center = DVec2::new(0.0, 0.0);
        s.paddles[1].center = DVec2::new(25.0, 5.0);
        let mut frame = FrameBuffer::for_scene(&s);
        frame.draw(&s);
        assert_eq!(frame.pixel(0, 0), colors::BALL);
        assert_eq!(frame.pixel(19, 5), colors::BACKGROUND);
    }

    #[test]
    fn test_grayscale() {
        let mut frame = FrameBuffer::new(2, 1);
        frame.pixels.copy_from_slice(&[255, 255, 255, 100, 0, 0]);
        assert_eq!(frame.grayscale(), vec![255, 21]);
    }
}
