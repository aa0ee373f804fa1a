//! Session configuration supplied by the host page.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};
use crate::doc::CanvasExtents;

/// Error returned when host-supplied configuration is unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The JSON payload could not be parsed.
    #[error("invalid editor config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A canvas dimension is zero, negative, or not finite.
    #[error("canvas {field} must be a positive finite number, got {value}")]
    InvalidDimension { field: &'static str, value: f64 },
}

/// Typed editor configuration. Every field has a default, so an empty JSON
/// object (or no config at all) yields a 1200x800 canvas.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self { canvas_width: DEFAULT_CANVAS_WIDTH, canvas_height: DEFAULT_CANVAS_HEIGHT }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the JSON is malformed or a dimension is
    /// not a positive finite number.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that both canvas dimensions are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDimension`] for the first bad dimension.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimension("width", self.canvas_width)?;
        check_dimension("height", self.canvas_height)
    }

    #[must_use]
    pub fn extents(&self) -> CanvasExtents {
        CanvasExtents { width: self.canvas_width, height: self.canvas_height }
    }
}

/// A canvas or element dimension must be a positive finite number.
pub(crate) fn check_dimension(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { field, value })
    }
}
