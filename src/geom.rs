#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in either client (page) or canvas-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn offset_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Maps client coordinates onto the canvas.
///
/// `origin_x` / `origin_y` are the client-space position of the canvas
/// element's top-left corner, as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Viewport {
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Viewport {
    /// Convert a client-space point to canvas-local coordinates.
    #[must_use]
    pub fn client_to_canvas(&self, client: Point) -> Point {
        Point { x: client.x - self.origin_x, y: client.y - self.origin_y }
    }
}
