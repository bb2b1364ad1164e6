//! Bidirectional mapping between normalized and screen space
//!
//! `to_screen` applies the scale factor and then a rotation-dependent axis
//! remap; `to_normalized` is its exact algebraic inverse for the same
//! viewport. Both directions must be evaluated against the same canvas
//! dimensions; callers re-derive both after any resize or rotation.

use crate::domain::Point;
use crate::viewport::{Rotation, Viewport};

impl Viewport {
    /// Map a normalized point onto the current canvas.
    pub fn to_screen(&self, p: Point) -> Point {
        let s = self.scale();
        let w = self.size().width;
        let h = self.size().height;
        match self.rotation() {
            Rotation::R0 => Point::new(p.x * s, p.y * s),
            Rotation::R90 => Point::new(w - p.y * s, p.x * s),
            Rotation::R180 => Point::new(w - p.x * s, h - p.y * s),
            Rotation::R270 => Point::new(p.y * s, h - p.x * s),
        }
    }

    /// Map a canvas pixel back into normalized space.
    pub fn to_normalized(&self, p: Point) -> Point {
        let s = self.scale();
        let w = self.size().width;
        let h = self.size().height;
        match self.rotation() {
            Rotation::R0 => Point::new(p.x / s, p.y / s),
            Rotation::R90 => Point::new(p.y / s, (w - p.x) / s),
            Rotation::R180 => Point::new((w - p.x) / s, (h - p.y) / s),
            Rotation::R270 => Point::new((h - p.y) / s, p.x / s),
        }
    }

    /// Scale a normalized length (stroke width, radius) to screen pixels.
    pub fn to_screen_len(&self, len: f64) -> f64 {
        len * self.scale()
    }
}
