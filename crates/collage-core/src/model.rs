//! Image records and their on-canvas geometry.

use crate::config::CanvasConfig;
use crate::id::ImageId;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

const DEFAULT_ALT_TEXT: &str = "Portfolio image";

/// One image supplied by the host view. Immutable for the canvas lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: ImageId,
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

impl ImageRecord {
    pub fn new(id: &str, url: impl Into<String>) -> Self {
        Self {
            id: ImageId::intern(id),
            url: url.into(),
            alt_text: None,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt_text = Some(alt.into());
        self
    }

    pub fn alt_or_default(&self) -> &str {
        match self.alt_text.as_deref() {
            Some(alt) if !alt.is_empty() => alt,
            _ => DEFAULT_ALT_TEXT,
        }
    }
}

/// A `hero_images` row as returned by the hosted backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HeroImageRow {
    pub id: String,
    pub image_url: String,
    pub alt_text: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub created_at: String,
}

/// Order rows by `display_order` (stable for ties) and project them to
/// records.
pub fn records_from_rows(mut rows: Vec<HeroImageRow>) -> Vec<ImageRecord> {
    rows.sort_by_key(|row| row.display_order);
    rows.into_iter()
        .map(|row| ImageRecord {
            id: ImageId::intern(&row.id),
            url: row.image_url,
            alt_text: row.alt_text,
        })
        .collect()
}

/// A corner of an image's unrotated bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }
}

/// Plain geometry snapshot, taken at the start of a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub position: Point,
    pub size: Size,
    pub rotation_degrees: f64,
}

impl Geometry {
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub fn center(&self) -> Point {
        self.rect().center()
    }

    pub fn corner(&self, corner: Corner) -> Point {
        let r = self.rect();
        match corner {
            Corner::TopLeft => Point::new(r.x0, r.y0),
            Corner::TopRight => Point::new(r.x1, r.y0),
            Corner::BottomLeft => Point::new(r.x0, r.y1),
            Corner::BottomRight => Point::new(r.x1, r.y1),
        }
    }
}

/// Mutable on-canvas state of one image.
///
/// `size` is private: height is always `width * aspect_ratio` and width is
/// always inside the configured clamp, so the only way to change size is
/// through [`PlacedImage::set_width`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedImage {
    pub id: ImageId,
    pub position: Point,
    size: Size,
    aspect_ratio: f64,
    pub z_index: u32,
    pub rotation_degrees: f64,
}

impl PlacedImage {
    pub fn new(
        id: ImageId,
        position: Point,
        width: f64,
        aspect_ratio: f64,
        z_index: u32,
        rotation_degrees: f64,
        config: &CanvasConfig,
    ) -> Self {
        let width = config.clamp_width(width);
        Self {
            id,
            position,
            size: Size::new(width, width * aspect_ratio),
            aspect_ratio,
            z_index,
            rotation_degrees,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn geometry(&self) -> Geometry {
        Geometry {
            position: self.position,
            size: self.size,
            rotation_degrees: self.rotation_degrees,
        }
    }

    pub fn center(&self) -> Point {
        self.geometry().center()
    }

    /// Set a new (clamped) width, deriving height from the fixed aspect
    /// ratio, while `anchor` stays where it is.
    pub fn set_width(&mut self, width: f64, anchor: Corner, config: &CanvasConfig) {
        let pinned = self.geometry().corner(anchor);
        let width = config.clamp_width(width);
        self.size = Size::new(width, width * self.aspect_ratio);
        let offset = Vec2::new(
            if anchor.is_left() { 0.0 } else { width },
            if anchor.is_top() { 0.0 } else { self.size.height },
        );
        self.position = pinned - offset;
    }

    /// Keep the whole unrotated box inside `viewport`. Boxes larger than
    /// the viewport pin to its top-left.
    pub fn clamp_into(&mut self, viewport: Size) {
        let max_x = (viewport.width - self.size.width).max(0.0);
        let max_y = (viewport.height - self.size.height).max(0.0);
        self.position.x = self.position.x.clamp(0.0, max_x);
        self.position.y = self.position.y.clamp(0.0, max_y);
    }
}
