//! Annotation types for page markup
//!
//! All annotation geometry is stored in normalized coordinates (scale 1,
//! rotation 0). An annotation is immutable once constructed; edits produce
//! a new instance.

use serde::{Deserialize, Serialize};

use super::geometry::{BoundingBox, Point};
use super::style::{Color, StrokeStyle};

/// One continuous freehand stroke
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokePath {
    pub points: Vec<Point>,
    /// Overrides the annotation default when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StrokeStyle>,
}

/// Freehand drawing made of one or more stroke paths
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FreehandAnnotation {
    pub paths: Vec<StrokePath>,
    pub style: StrokeStyle,
}

/// Corner-pair annotation: plain rectangle, draw area or rect selection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectAnnotation {
    pub start: Point,
    pub end: Point,
    pub style: StrokeStyle,
}

/// Rectangle with editable wrapped text inside
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextAreaAnnotation {
    pub start: Point,
    pub end: Point,
    pub style: StrokeStyle,
    pub text: String,
    /// Font size at scale 1
    #[serde(rename = "fontSize")]
    pub font_size: f64,
}

/// Pasted or uploaded image placed between two corners
///
/// The raster payload is a base64-encoded PNG; the placement corners come
/// from the external image-resizing collaborator, which supplies decoded
/// pixel dimensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageAnnotation {
    pub start: Point,
    pub end: Point,
    pub data: String,
}

/// One straight segment of a line annotation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
    /// Overrides the annotation default when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StrokeStyle>,
}

/// Straight-line annotation made of one or more segments
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineAnnotation {
    pub segments: Vec<LineSegment>,
    pub style: StrokeStyle,
}

/// Callout with a pin, a bent arrow, a horizontal label tail and text
///
/// An absent bend point is treated as a bend located at the pin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtensionLineAnnotation {
    pub pin: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bend: Option<Point>,
    pub text: String,
    pub color: Color,
}

/// Underline or strike-out segments over detected text runs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextMarkupAnnotation {
    pub segments: Vec<LineSegment>,
    pub style: StrokeStyle,
}

/// Translucent highlight over detected text rectangles
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HighlightAnnotation {
    pub rects: Vec<BoundingBox>,
    pub style: StrokeStyle,
    /// Overrides [`config::highlight::DEFAULT_OPACITY`](crate::config::highlight)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

/// Single dropped pin
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinAnnotation {
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

/// Composite of heterogeneous sub-annotations drawn in one editing session
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MiscAnnotation {
    pub parts: Vec<AnnotationKind>,
}

/// Unified annotation variant type
///
/// A closed set as far as this engine draws and measures; `Other` carries
/// records written by a newer producer so they survive a round trip.
#[derive(Clone, Debug, PartialEq)]
pub enum AnnotationKind {
    Freehand(FreehandAnnotation),
    Rectangle(RectAnnotation),
    DrawArea(RectAnnotation),
    RectSelection(RectAnnotation),
    TextArea(TextAreaAnnotation),
    Image(ImageAnnotation),
    Line(LineAnnotation),
    ExtensionLine(ExtensionLineAnnotation),
    TextUnderline(TextMarkupAnnotation),
    TextCrossedOut(TextMarkupAnnotation),
    TextHighlight(HighlightAnnotation),
    PinSelection(PinAnnotation),
    Misc(MiscAnnotation),
    /// Unrecognized variant preserved verbatim from the wire
    Other {
        page_type: String,
        payload: serde_json::Value,
    },
}

impl AnnotationKind {
    /// Wire discriminant for this variant
    pub fn page_type(&self) -> &str {
        match self {
            AnnotationKind::Freehand(_) => "freehand",
            AnnotationKind::Rectangle(_) => "rectangle",
            AnnotationKind::DrawArea(_) => "drawArea",
            AnnotationKind::RectSelection(_) => "rectSelection",
            AnnotationKind::TextArea(_) => "textArea",
            AnnotationKind::Image(_) => "image",
            AnnotationKind::Line(_) => "line",
            AnnotationKind::ExtensionLine(_) => "extensionLine",
            AnnotationKind::TextUnderline(_) => "textUnderline",
            AnnotationKind::TextCrossedOut(_) => "textCrossedOut",
            AnnotationKind::TextHighlight(_) => "textHighlight",
            AnnotationKind::PinSelection(_) => "pinSelection",
            AnnotationKind::Misc(_) => "misc",
            AnnotationKind::Other { page_type, .. } => page_type,
        }
    }

    /// Check if this is a text markup variant (underline, strike-out, highlight)
    pub fn is_text_markup(&self) -> bool {
        matches!(
            self,
            AnnotationKind::TextUnderline(_)
                | AnnotationKind::TextCrossedOut(_)
                | AnnotationKind::TextHighlight(_)
        )
    }

    /// Check if this is a corner-pair shape variant
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            AnnotationKind::Rectangle(_)
                | AnnotationKind::DrawArea(_)
                | AnnotationKind::RectSelection(_)
                | AnnotationKind::TextArea(_)
                | AnnotationKind::Image(_)
        )
    }
}

/// A finalized or draft annotation attached to one page
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    /// Stable identifier assigned at commit time; empty while in draft
    pub id: String,
    pub page_number: u32,
    /// Base64 PNG snapshot captured over the padded bounding box
    pub thumbnail: Option<String>,
    /// Normalized-space bounds
    pub bounds: BoundingBox,
    pub kind: AnnotationKind,
}

impl Annotation {
    /// Create a draft annotation (no id, no thumbnail)
    pub fn new(page_number: u32, kind: AnnotationKind, bounds: BoundingBox) -> Self {
        Self {
            id: String::new(),
            page_number,
            thumbnail: None,
            bounds,
            kind,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.id.is_empty()
    }

    /// Copy with the identifier assigned by the persistence collaborator
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Copy with a captured thumbnail attached
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}
