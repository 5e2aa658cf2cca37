//! Error types.
//!
//! None of these escape the canvas as hard failures: load errors degrade a
//! single image to placeholder geometry, layout errors defer initialization
//! until the host reports a real viewport.

/// Why an image probe did not produce natural dimensions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadFailure {
    #[error("resource not found")]
    NotFound,
    #[error("could not decode image")]
    Decode,
    #[error("image reported zero natural dimensions")]
    ZeroDimensions,
    #[error("{0}")]
    Host(String),
}

/// A single failed image probe.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to load {url}: {reason}")]
pub struct LoadError {
    pub url: String,
    pub reason: LoadFailure,
}

impl LoadError {
    pub fn new(url: impl Into<String>, reason: LoadFailure) -> Self {
        Self {
            url: url.into(),
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("viewport {width}x{height} has no usable area")]
    DegenerateViewport { width: f64, height: f64 },
    #[error("expected {expected} probe results, got {actual}")]
    ProbeCountMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("min_size must be positive, got {0}")]
    NonPositiveMinSize(f64),
    #[error("min_size {min} exceeds max_size {max}")]
    InvertedSizeRange { min: f64, max: f64 },
    #[error("base width range [{min}, {max}) is empty")]
    InvertedBaseWidth { min: f64, max: f64 },
    #[error("fallback aspect ratio must be positive, got {0}")]
    NonPositiveFallbackAspect(f64),
    #[error("compact breakpoint must be positive")]
    ZeroBreakpoint,
}
