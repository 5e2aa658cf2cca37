//! Stacking order for placed images.

use crate::id::ImageId;
use crate::model::PlacedImage;

/// Monotonic "top of stack" counter.
///
/// Every bring-to-front allocates a fresh value, so no two images ever
/// share a z-index and the last one raised is always on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZOrder {
    top: u32,
}

impl ZOrder {
    /// Continue after an initial stack of `count` images holding 1..=count.
    pub fn after(count: usize) -> Self {
        let top = u32::try_from(count).map_or(u32::MAX, |n| n.saturating_add(1));
        Self { top }
    }

    pub fn top(&self) -> u32 {
        self.top
    }

    /// Allocate the next z-index. Saturates at `u32::MAX`.
    pub fn next(&mut self) -> u32 {
        self.top = self.top.saturating_add(1);
        self.top
    }

    /// Raise `id` above every other image. Returns the assigned z-index, or
    /// `None` when `id` is not in the set.
    pub fn bring_to_front(&mut self, images: &mut [PlacedImage], id: ImageId) -> Option<u32> {
        let image = images.iter_mut().find(|img| img.id == id)?;
        let z = self.next();
        image.z_index = z;
        log::trace!("z-order: {id} -> {z}");
        Some(z)
    }
}

impl Default for ZOrder {
    fn default() -> Self {
        Self::after(0)
    }
}
