//! Points on circles.
//!
//! Angles are absolute radians. Dial angles run counter-clockwise from the
//! positive x axis with y flipped, so 3π/2 is the top of a dial.

use glam::{DVec2, dvec2};

/// Point at `theta` on a dial circle: `(cx + r cos θ, cy − r sin θ)`.
#[inline]
pub fn point_on_circle(center: DVec2, radius: f64, theta: f64) -> DVec2 {
    dvec2(center.x + radius * theta.cos(), center.y - radius * theta.sin())
}

/// Point at bearing `beta` measured clockwise from the top of a hole:
/// `(cx + r sin β, cy + r cos β)`.
#[inline]
pub fn compass_point(center: DVec2, radius: f64, beta: f64) -> DVec2 {
    dvec2(center.x + radius * beta.sin(), center.y + radius * beta.cos())
}

/// `count` evenly spaced bearings covering a full turn, both ends included.
pub fn full_turn(count: usize) -> impl Iterator<Item = f64> {
    let last = count.saturating_sub(1).max(1) as f64;
    (0..count).map(move |i| std::f64::consts::TAU * i as f64 / last)
}
