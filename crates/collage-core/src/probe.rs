//! Image dimension probing.
//!
//! The layout needs every image's natural aspect ratio before it can place
//! anything. Probes run concurrently and are joined with per-item error
//! capture: one broken URL never holds back or aborts the rest.

use crate::error::{LoadError, LoadFailure};
use crate::model::ImageRecord;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;

/// Natural pixel dimensions reported by a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalSize {
    pub width: u32,
    pub height: u32,
}

impl NaturalSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `height / width`.
    pub fn aspect_ratio(&self) -> f64 {
        self.height as f64 / self.width as f64
    }

    fn checked(self, url: &str) -> Result<Self, LoadError> {
        if self.width == 0 || self.height == 0 {
            Err(LoadError::new(url, LoadFailure::ZeroDimensions))
        } else {
            Ok(self)
        }
    }
}

/// Something that can load an image and report its natural size.
pub trait ImageProbe {
    fn probe(&self, url: &str) -> impl Future<Output = Result<NaturalSize, LoadError>>;
}

/// Probe every record concurrently. Results come back in input order no
/// matter which load settles first.
pub async fn probe_all<P: ImageProbe>(
    probe: &P,
    records: &[ImageRecord],
) -> Vec<Result<NaturalSize, LoadError>> {
    let pending = records.iter().map(|record| async move {
        let result = probe
            .probe(&record.url)
            .await
            .and_then(|size| size.checked(&record.url));
        if let Err(err) = &result {
            log::warn!("image probe failed for {}: {err}", record.id);
        }
        result
    });
    join_all(pending).await
}

/// In-memory probe backed by a URL → size table. Unknown URLs fail with
/// [`LoadFailure::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    sizes: HashMap<String, NaturalSize>,
}

impl StaticProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: impl Into<String>, width: u32, height: u32) -> Self {
        self.sizes.insert(url.into(), NaturalSize::new(width, height));
        self
    }
}

impl ImageProbe for StaticProbe {
    fn probe(&self, url: &str) -> impl Future<Output = Result<NaturalSize, LoadError>> {
        let result = self
            .sizes
            .get(url)
            .copied()
            .ok_or_else(|| LoadError::new(url, LoadFailure::NotFound));
        std::future::ready(result)
    }
}
