//! Scatter layout for the initial arrangement.
//!
//! Images are spread around a cluster center sitting slightly below the
//! viewport midpoint: image `i` of `N` sits at angle `2π·i/N` plus a little
//! jitter, a random distance out, with a random base width and a small
//! tilt. Positions are clamped so every image starts fully on screen and
//! below the tagline.

use crate::config::CanvasConfig;
use crate::error::{LayoutError, LoadError};
use crate::model::{ImageRecord, PlacedImage};
use crate::probe::NaturalSize;
use crate::zorder::ZOrder;
use kurbo::{Point, Size};
use rand::Rng;
use std::f64::consts::TAU;

/// The canvas (viewport) dimensions, as measured by the host after layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero or non-finite dimensions mean the host has not laid out yet.
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Result of initialization: one placed image per record, in input order,
/// plus the z-order counter to continue from.
#[derive(Debug, Clone)]
pub struct Arrangement {
    pub images: Vec<PlacedImage>,
    pub z_order: ZOrder,
}

/// Place every record. `probes[i]` is the probe outcome for `records[i]`;
/// failed probes get fixed placeholder geometry rather than being dropped.
pub fn scatter<R: Rng>(
    records: &[ImageRecord],
    probes: &[Result<NaturalSize, LoadError>],
    viewport: Viewport,
    config: &CanvasConfig,
    rng: &mut R,
) -> Result<Arrangement, LayoutError> {
    if !viewport.is_measured() {
        return Err(LayoutError::DegenerateViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    if records.len() != probes.len() {
        return Err(LayoutError::ProbeCountMismatch {
            expected: records.len(),
            actual: probes.len(),
        });
    }

    let count = records.len();
    let center = Point::new(
        viewport.width * config.cluster_center.0,
        viewport.height * config.cluster_center.1,
    );

    let images = records
        .iter()
        .zip(probes)
        .enumerate()
        .map(|(i, (record, probe))| {
            let z_index = i as u32 + 1;
            match probe {
                Ok(natural) => place_loaded(
                    record,
                    natural.aspect_ratio(),
                    i,
                    count,
                    center,
                    viewport,
                    config,
                    z_index,
                    &mut *rng,
                ),
                Err(err) => {
                    log::debug!("placing fallback for {}: {err}", record.id);
                    place_fallback(record, center, config, z_index)
                }
            }
        })
        .collect();

    log::debug!(
        "scattered {count} images in {}x{}",
        viewport.width,
        viewport.height
    );

    Ok(Arrangement {
        images,
        z_order: ZOrder::after(count),
    })
}

#[allow(clippy::too_many_arguments)]
fn place_loaded<R: Rng>(
    record: &ImageRecord,
    aspect: f64,
    index: usize,
    count: usize,
    center: Point,
    viewport: Viewport,
    config: &CanvasConfig,
    z_index: u32,
    rng: &mut R,
) -> PlacedImage {
    let w = config.clamp_width(sample(rng, config.base_width_min, config.base_width_max));
    let h = w * aspect;
    let angle = (index as f64 / count as f64) * TAU + sample(rng, 0.0, config.angle_jitter);
    let radius = sample(rng, 0.0, config.max_radius);

    let x = (center.x + angle.cos() * radius - w / 2.0)
        .min(viewport.width - w - config.margin_side)
        .max(config.margin_side);
    let y = (center.y + angle.sin() * radius * config.vertical_squash - h / 2.0)
        .min(viewport.height - h - config.margin_bottom)
        .max(config.margin_top);

    let tilt = config.max_tilt_degrees;
    let rotation = sample(rng, -tilt, tilt);

    PlacedImage::new(record.id, Point::new(x, y), w, aspect, z_index, rotation, config)
}

/// Uniform sample from `[lo, hi)`; collapses to `lo` for an empty range.
fn sample<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

fn place_fallback(
    record: &ImageRecord,
    center: Point,
    config: &CanvasConfig,
    z_index: u32,
) -> PlacedImage {
    let w = config.fallback_width;
    let h = w * config.fallback_aspect_ratio;
    PlacedImage::new(
        record.id,
        Point::new(center.x - w / 2.0, center.y - h / 2.0),
        w,
        config.fallback_aspect_ratio,
        z_index,
        0.0,
        config,
    )
}
