//! Logical-pixel geometry for focusable bounding boxes.
//!
//! Navigation never reads terminal cells; the registry reports item bounds in
//! an abstract pixel space so the directional scoring stays independent of
//! any rendering layer.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding rectangle of a focusable item.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge.
    #[inline]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Top edge.
    #[inline]
    pub const fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}
