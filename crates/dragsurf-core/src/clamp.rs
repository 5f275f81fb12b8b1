#![forbid(unsafe_code)]

//! Clamp policy: limit a proposed drag delta so the element's rectangle
//! stays within optional screen-coordinate bounds.
//!
//! All limits are computed against the rectangle captured when the drag
//! was granted, never the live rectangle. Per axis:
//!
//! ```text
//! lower  = min - leading_edge_at_start    (or -inf when min is absent)
//! upper  = max - trailing_edge_at_start   (or +inf when max is absent)
//! result = max(lower, min(delta, upper))
//! ```
//!
//! When the start rectangle is wider than the permitted region, `lower`
//! exceeds `upper` and the lower bound wins. Non-finite inputs are not
//! validated; they propagate through IEEE arithmetic.

use crate::geometry::{BoundsConstraints, Position, Rect};

/// Permitted range for one axis.
#[inline]
fn axis_limits(
    min: Option<f32>,
    max: Option<f32>,
    leading: f32,
    trailing: f32,
) -> (f32, f32) {
    let lower = min.map_or(f32::NEG_INFINITY, |m| m - leading);
    let upper = max.map_or(f32::INFINITY, |m| m - trailing);
    (lower, upper)
}

#[inline]
fn clamp_axis(delta: f32, (lower, upper): (f32, f32)) -> f32 {
    // Not `f32::clamp`: that panics when lower > upper.
    lower.max(delta.min(upper))
}

/// Clamp `delta` so that `start.translate(result)` respects `constraints`.
#[must_use]
pub fn clamp_delta(delta: Position, start: &Rect, constraints: &BoundsConstraints) -> Position {
    let x = axis_limits(constraints.min_x, constraints.max_x, start.left, start.right);
    let y = axis_limits(constraints.min_y, constraints.max_y, start.top, start.bottom);
    Position::new(clamp_axis(delta.x, x), clamp_axis(delta.y, y))
}
