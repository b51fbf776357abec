//! Axis-aligned rectangles in page coordinates.
//!
//! Element bounds and the viewport share one coordinate space: CSS pixels measured
//! from the top-left of the scrollable document. Scrolling therefore moves only the
//! viewport rectangle; element bounds change only on layout.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, origin at top-left, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    /// Viewport-sized rectangle at the document origin
    #[must_use]
    pub const fn from_size(width: f32, height: f32) -> Self {
        Rect::new(0.0, 0.0, width, height)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// A rectangle shrunk past zero extent, or one with non-finite edges
    pub fn is_degenerate(&self) -> bool {
        !(self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite())
            || self.width < 0.0
            || self.height < 0.0
    }

    /// Grow (positive margin) or shrink (negative margin) on every side.
    ///
    /// Shrinking below zero extent yields a degenerate rectangle that intersects nothing.
    #[must_use]
    pub fn inflate(&self, margin: f32) -> Rect {
        Rect {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    /// Same rectangle moved by `(dx, dy)`
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Overlap test with inclusive edges.
    ///
    /// Rectangles that only touch along an edge count as intersecting, matching how
    /// intersection observers report adjacency at threshold zero.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_degenerate() || other.is_degenerate() {
            return false;
        }
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }
}
