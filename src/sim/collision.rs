//! Swept collision tests
//!
//! The ball is tested as the segment it travelled during the step, not as the
//! point where it ended up. A fast ball therefore cannot skip over a paddle edge
//! between two updates.

use glam::DVec2;

/// Parametric intersection of segments `a0 → a1` and `b0 → b1`
///
/// Returns `(s, t)` where `s` parametrizes `b` and `t` parametrizes `a`, both in
/// `[0, 1]`, or `None` when the segments miss. Parallel segments never intersect
/// (the zero denominator yields non-finite parameters that fail the range test).
pub fn segment_intersection(a0: DVec2, a1: DVec2, b0: DVec2, b1: DVec2) -> Option<(f64, f64)> {
    let s1 = a1 - a0;
    let s2 = b1 - b0;
    let d = a0 - b0;

    let denom = -s2.x * s1.y + s1.x * s2.y;
    let s = (-s1.y * d.x + s1.x * d.y) / denom;
    let t = (s2.x * d.y - s2.y * d.x) / denom;

    let unit = 0.0..=1.0;
    (unit.contains(&s) && unit.contains(&t)).then_some((s, t))
}

/// Whether segment `a0 → a1` crosses segment `b0 → b1`
#[inline]
pub fn segments_intersect(a0: DVec2, a1: DVec2, b0: DVec2, b1: DVec2) -> bool {
    segment_intersection(a0, a1, b0, b1).is_some()
}

/// Vertical segment of length `height` centred on `center`
#[inline]
pub fn vertical_edge(center: DVec2, height: f64) -> (DVec2, DVec2) {
    let half = DVec2::new(0.0, height / 2.0);
    (center - half, center + half)
}
