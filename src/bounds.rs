//! Keeps element positions on the canvas.
//!
//! The upper bound only reserves *half* of the element's extent, so an element
//! may hang past the right/bottom edge by up to half its width/height before
//! the clamp engages. Positions are never pushed below zero.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use crate::doc::CanvasExtents;
use crate::geom::{Point, Size};

/// Constrain a proposed top-left `position` for an element of `size` to the
/// canvas `extents`.
#[must_use]
pub fn clamp(position: Point, size: Size, extents: CanvasExtents) -> Point {
    Point {
        x: clamp_axis(position.x, size.width, extents.width),
        y: clamp_axis(position.y, size.height, extents.height),
    }
}

fn clamp_axis(value: f64, extent: f64, limit: f64) -> f64 {
    value.min(limit - extent / 2.0).max(0.0)
}
