//! Tunable constants for the floating canvas.
//!
//! Every field has a default matching the hero page; hosts may override any
//! subset from JSON (`{"minSize": 80, "compactBreakpoint": 640}`).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Width clamp applied on every resize, in px.
    pub min_size: f64,
    pub max_size: f64,

    /// Random base width range `[min, max)` for freshly scattered images.
    pub base_width_min: f64,
    pub base_width_max: f64,

    /// Upper bound of the random angular jitter added to `2π·i/N`, radians.
    pub angle_jitter: f64,
    /// Upper bound of the random distance from the cluster center, px.
    pub max_radius: f64,
    /// Vertical radius multiplier; < 1 flattens the cluster into an ellipse.
    pub vertical_squash: f64,
    /// Cluster center as fractions of the viewport `(x, y)`.
    pub cluster_center: (f64, f64),

    pub margin_side: f64,
    /// Larger than the side margin so images clear the tagline heading.
    pub margin_top: f64,
    pub margin_bottom: f64,

    /// Initial tilt is drawn from `[-max_tilt_degrees, max_tilt_degrees)`.
    pub max_tilt_degrees: f64,

    pub fallback_width: f64,
    pub fallback_aspect_ratio: f64,

    /// Viewports narrower than this render the static grid.
    pub compact_breakpoint: f64,

    /// Keep moved images inside the viewport.
    pub clamp_moves: bool,

    /// Side of the square corner handles, px.
    pub handle_size: f64,
    /// Distance of the rotate handle above the top edge, px.
    pub rotate_handle_offset: f64,

    pub reveal_stagger_ms: u32,
    pub drag_lift_scale: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_size: 100.0,
            max_size: 600.0,
            base_width_min: 180.0,
            base_width_max: 300.0,
            angle_jitter: 0.5,
            max_radius: 300.0,
            vertical_squash: 0.5,
            cluster_center: (0.5, 0.55),
            margin_side: 20.0,
            margin_top: 100.0,
            margin_bottom: 60.0,
            max_tilt_degrees: 5.0,
            fallback_width: 220.0,
            fallback_aspect_ratio: 0.75,
            compact_breakpoint: 768.0,
            clamp_moves: false,
            handle_size: 12.0,
            rotate_handle_offset: 28.0,
            reveal_stagger_ms: 100,
            drag_lift_scale: 1.08,
        }
    }
}

impl CanvasConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_size <= 0.0 {
            return Err(ConfigError::NonPositiveMinSize(self.min_size));
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::InvertedSizeRange {
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.base_width_min >= self.base_width_max {
            return Err(ConfigError::InvertedBaseWidth {
                min: self.base_width_min,
                max: self.base_width_max,
            });
        }
        if self.fallback_aspect_ratio <= 0.0 {
            return Err(ConfigError::NonPositiveFallbackAspect(
                self.fallback_aspect_ratio,
            ));
        }
        if self.compact_breakpoint <= 0.0 {
            return Err(ConfigError::ZeroBreakpoint);
        }
        Ok(())
    }

    /// Clamp a candidate width into `[min_size, max_size]`.
    pub fn clamp_width(&self, width: f64) -> f64 {
        width.clamp(self.min_size, self.max_size)
    }

    pub fn is_compact(&self, viewport_width: f64) -> bool {
        viewport_width < self.compact_breakpoint
    }
}
