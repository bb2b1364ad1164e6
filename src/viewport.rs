//! Viewport parameters: rotation, canvas size and zoom
//!
//! The transform functions always take the *current, already-rotated*
//! pixel dimensions of the surface being addressed. [`PageSize`] is the
//! intrinsic unrotated page size at scale 1; [`CanvasSize::of_page`] is
//! the only sanctioned conversion between the two, so the distinction is
//! enforced at the API boundary.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Page rotation in fixed quarter turns
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Parse a rotation from wire data. Anything outside {0, 90, 180, 270}
    /// is a programming error on the producer's side and fails fast.
    pub fn from_degrees(degrees: u16) -> Result<Self, Error> {
        match degrees {
            0 => Ok(Rotation::R0),
            90 => Ok(Rotation::R90),
            180 => Ok(Rotation::R180),
            270 => Ok(Rotation::R270),
            other => Err(Error::InvalidRotation(other)),
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// Whether this rotation swaps the page's width and height on screen
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::R90 | Rotation::R270)
    }
}

/// Intrinsic unrotated page size at scale 1
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Current pixel size of a rendered canvas, after rotation and scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Derive the on-screen canvas size of a page at the given scale and
    /// rotation. Width and height swap for quarter-turn rotations.
    pub fn of_page(page: PageSize, scale: f64, rotation: Rotation) -> Self {
        if rotation.swaps_axes() {
            Self::new(page.height * scale, page.width * scale)
        } else {
            Self::new(page.width * scale, page.height * scale)
        }
    }
}

/// Per-page viewport parameters supplied by the page-rendering collaborator
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    size: CanvasSize,
    scale: f64,
    rotation: Rotation,
}

impl Viewport {
    /// Validate and build a viewport. Non-positive or non-finite scale and
    /// dimensions are programming errors and are rejected, never coerced.
    pub fn new(size: CanvasSize, scale: f64, rotation: Rotation) -> Result<Self, Error> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::InvalidScale(scale));
        }
        if !(size.width.is_finite() && size.width > 0.0)
            || !(size.height.is_finite() && size.height > 0.0)
        {
            return Err(Error::InvalidCanvas {
                width: size.width,
                height: size.height,
            });
        }
        Ok(Self {
            size,
            scale,
            rotation,
        })
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }
}
