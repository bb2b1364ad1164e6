//! Annotation geometry and rendering engine for PDF page markup
//!
//! Users draw freehand strokes, shapes, text callouts, highlights and
//! pasted images on top of rendered PDF pages; this crate owns the
//! geometry underneath: the rotation- and scale-invariant normalized
//! coordinate space, per-variant bounding boxes, the render pipeline that
//! reconstructs pixel-accurate drawings at any zoom/rotation, thumbnail
//! capture and the draft accumulator for multi-stroke sessions.
//!
//! The surrounding application (page virtualization, input handling,
//! persistence) acts as a collaborator: it supplies viewport parameters
//! and canvas-relative pixel coordinates, and stores the normalized
//! annotations this crate produces.
//!
//! ```
//! use pagemark::{CanvasSize, Point, Rotation, Viewport};
//!
//! let vp = Viewport::new(CanvasSize::new(400.0, 400.0), 2.0, Rotation::R0).unwrap();
//! let normalized = vp.to_normalized(Point::new(100.0, 100.0));
//! assert_eq!(normalized, Point::new(50.0, 50.0));
//! assert_eq!(vp.to_screen(normalized), Point::new(100.0, 100.0));
//! ```

pub mod bounds;
pub mod capture;
pub mod config;
pub mod domain;
pub mod draft;
mod error;
pub mod render;
pub mod text;
mod transform;
pub mod viewport;
pub mod wire;

pub use bounds::{capture_box, compute_bounds, stored_capture_box};
pub use capture::capture_region;
pub use domain::{
    Annotation, AnnotationKind, BoundingBox, Color, ExtensionLineAnnotation, FreehandAnnotation,
    HighlightAnnotation, ImageAnnotation, LineAnnotation, LineSegment, MiscAnnotation,
    PinAnnotation, Point, RectAnnotation, StrokePath, StrokeStyle, TextAreaAnnotation,
    TextMarkupAnnotation,
};
pub use draft::{DraftAccumulator, DraftState};
pub use error::Error;
pub use render::surface::{PixmapSurface, Surface};
pub use render::{draw_annotations_in_order, render, render_kind};
pub use text::{HeuristicMetrics, TextMetrics};
pub use viewport::{CanvasSize, PageSize, Rotation, Viewport};
pub use wire::{from_wire, from_wire_str, to_wire, to_wire_string};
