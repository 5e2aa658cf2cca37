//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and pen pointer events into a unified
//! `InputEvent` enum consumed by the drag tool. Coordinates are viewport
//! pixels, the same space as `PlacedImage::position`.

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start, pen contact).
    PointerDown { x: f64, y: f64 },

    /// Pointer moved. Delivered while captured, even outside the image.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Pointer left the tracked surface. Ends a drag in case the matching
    /// pointer-up is never delivered.
    PointerLeave,

    /// The platform cancelled the gesture (touch interrupted, capture lost).
    PointerCancel,
}

impl InputEvent {
    pub fn from_pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn from_pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn from_pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp { x, y }
    }

    /// Whether this event ends any gesture in progress.
    pub fn ends_gesture(&self) -> bool {
        matches!(
            self,
            Self::PointerUp { .. } | Self::PointerLeave | Self::PointerCancel
        )
    }
}
