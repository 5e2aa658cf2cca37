//! Hit testing: point → (image, handle) lookup.
//!
//! Walks images front-to-back by z-index. The point is rotated into each
//! image's unrotated frame about its center, so handles and bodies follow
//! the image's tilt. Handles take priority over the body of the same image.

use crate::drag::DragMode;
use collage_core::CanvasConfig;
use collage_core::id::ImageId;
use collage_core::model::{Corner, PlacedImage};
use kurbo::{Affine, Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: ImageId,
    pub mode: DragMode,
}

/// Find the topmost image part at `point`. Returns `None` for background.
pub fn hit_test(images: &[PlacedImage], point: Point, config: &CanvasConfig) -> Option<Hit> {
    let mut order: Vec<&PlacedImage> = images.iter().collect();
    order.sort_by(|a, b| b.z_index.cmp(&a.z_index));

    order
        .into_iter()
        .find_map(|image| hit_image(image, point, config))
}

/// Where the rotate handle sits in the image's unrotated frame.
pub fn rotate_handle_center(image: &PlacedImage, config: &CanvasConfig) -> Point {
    let rect = image.geometry().rect();
    Point::new(rect.center().x, rect.y0 - config.rotate_handle_offset)
}

fn hit_image(image: &PlacedImage, point: Point, config: &CanvasConfig) -> Option<Hit> {
    let geometry = image.geometry();
    let to_local = Affine::rotate_about(-geometry.rotation_degrees.to_radians(), geometry.center());
    let local = to_local * point;
    let handle = (config.handle_size, config.handle_size);

    let corner = Corner::ALL
        .into_iter()
        .find(|c| Rect::from_center_size(geometry.corner(*c), handle).contains(local));

    let mode = if let Some(corner) = corner {
        DragMode::Resize(corner)
    } else if rotate_handle_center(image, config).distance(local) <= config.handle_size / 2.0 {
        DragMode::Rotate
    } else if geometry.rect().contains(local) {
        DragMode::Move
    } else {
        return None;
    };

    Some(Hit { id: image.id, mode })
}
