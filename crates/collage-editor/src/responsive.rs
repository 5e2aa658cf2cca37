//! Compact-viewport detection.
//!
//! Below the breakpoint the canvas swaps wholesale to the static grid and
//! stops interpreting pointer input.

use collage_core::CanvasConfig;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewportMode {
    #[default]
    Free,
    Compact,
}

impl ViewportMode {
    pub fn for_width(width: f64, config: &CanvasConfig) -> Self {
        if config.is_compact(width) {
            ViewportMode::Compact
        } else {
            ViewportMode::Free
        }
    }

    pub fn is_compact(self) -> bool {
        self == ViewportMode::Compact
    }
}

/// Outcome of re-evaluating the mode after a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    Unchanged,
    EnteredCompact,
    LeftCompact,
}

impl ModeChange {
    pub fn between(before: ViewportMode, after: ViewportMode) -> Self {
        match (before, after) {
            (ViewportMode::Free, ViewportMode::Compact) => ModeChange::EnteredCompact,
            (ViewportMode::Compact, ViewportMode::Free) => ModeChange::LeftCompact,
            _ => ModeChange::Unchanged,
        }
    }
}
