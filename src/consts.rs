//! Shared numeric and string constants for the folio crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Default canvas width in CSS pixels.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;

/// Default canvas height in CSS pixels.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 800.0;

/// Where a freshly added element lands when no position is supplied.
pub const DEFAULT_ELEMENT_X: f64 = 100.0;
pub const DEFAULT_ELEMENT_Y: f64 = 100.0;

// ── Element defaults ────────────────────────────────────────────

pub const TEXT_WIDTH: f64 = 200.0;
pub const TEXT_HEIGHT: f64 = 50.0;
pub const TEXT_CONTENT: &str = "Edit this text";
pub const TEXT_COLOR: &str = "#000000";
pub const TEXT_FONT_SIZE: &str = "16px";

pub const IMAGE_WIDTH: f64 = 300.0;
pub const IMAGE_HEIGHT: f64 = 200.0;
pub const IMAGE_PLACEHOLDER_URL: &str = "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b";

pub const SHAPE_WIDTH: f64 = 100.0;
pub const SHAPE_HEIGHT: f64 = 100.0;
pub const SHAPE_FILL: &str = "#3b82f6";

/// Square corners.
pub const ZERO_RADIUS: &str = "0px";

// ── Controls ────────────────────────────────────────────────────

/// Side length of the drag handle and delete control, in CSS pixels.
pub const CONTROL_SIZE_PX: f64 = 24.0;

/// How far the delete control sits outside the element's top-right corner.
pub const DELETE_CONTROL_OUTSET_PX: f64 = 16.0;
