//! Draft accumulation for multi-stroke editing sessions
//!
//! A session collects heterogeneous strokes and shapes drawn in one
//! continuous editing session and commits them as a single composite
//! annotation with one combined bounding box. The accumulator is the only
//! mutable state in the engine; every sub-annotation it receives is
//! already finalized and immutable.

use image::RgbaImage;

use crate::bounds::{self, compute_bounds};
use crate::capture::capture_region;
use crate::domain::{
    Annotation, AnnotationKind, FreehandAnnotation, MiscAnnotation, RectAnnotation, StrokePath,
    StrokeStyle,
};
use crate::text::TextMetrics;
use crate::viewport::Viewport;

/// Session state: `Empty -> Accumulating -> {committed | cancelled} -> Empty`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DraftState {
    #[default]
    Empty,
    Accumulating,
}

/// Session-scoped accumulator for one page
#[derive(Debug, Default)]
pub struct DraftAccumulator {
    page_number: u32,
    parts: Vec<AnnotationKind>,
    state: DraftState,
}

impl DraftAccumulator {
    pub fn new(page_number: u32) -> Self {
        Self {
            page_number,
            parts: Vec::new(),
            state: DraftState::Empty,
        }
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Append any finalized sub-annotation
    pub fn push(&mut self, kind: AnnotationKind) {
        self.parts.push(kind);
        self.state = DraftState::Accumulating;
    }

    /// Append one freehand stroke
    pub fn add_stroke(&mut self, path: StrokePath, style: StrokeStyle) {
        self.push(AnnotationKind::Freehand(FreehandAnnotation {
            paths: vec![path],
            style,
        }));
    }

    /// Append one rectangle shape
    pub fn add_shape(&mut self, rect: RectAnnotation) {
        self.push(AnnotationKind::Rectangle(rect));
    }

    /// Discard all accumulated state unconditionally
    pub fn cancel(&mut self) {
        self.parts.clear();
        self.state = DraftState::Empty;
    }

    /// Commit the session as one composite annotation.
    ///
    /// An empty session discards itself and produces nothing. The returned
    /// annotation is a draft: its id is assigned by the persistence
    /// collaborator and its thumbnail by [`finish_with_thumbnail`].
    ///
    /// [`finish_with_thumbnail`]: DraftAccumulator::finish_with_thumbnail
    pub fn finish(&mut self, metrics: &dyn TextMetrics) -> Option<Annotation> {
        self.state = DraftState::Empty;
        if self.parts.is_empty() {
            return None;
        }
        let kind = AnnotationKind::Misc(MiscAnnotation {
            parts: std::mem::take(&mut self.parts),
        });
        let bounds = compute_bounds(&kind, metrics);
        Some(Annotation::new(self.page_number, kind, bounds))
    }

    /// Commit and capture a thumbnail over the union's padded, clamped
    /// screen-space box. A failed capture still commits the annotation.
    pub fn finish_with_thumbnail(
        &mut self,
        metrics: &dyn TextMetrics,
        viewport: &Viewport,
        background: &RgbaImage,
        annotation_layer: Option<&RgbaImage>,
    ) -> Option<Annotation> {
        let annotation = self.finish(metrics)?;
        let region = bounds::capture_box(&annotation.bounds, viewport);
        match capture_region(background, annotation_layer, &region, true) {
            Some(thumbnail) => Some(annotation.with_thumbnail(thumbnail)),
            None => Some(annotation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoundingBox, Point};
    use crate::text::HeuristicMetrics;
    use crate::viewport::{CanvasSize, Rotation};

    fn stroke(points: &[(f64, f64)]) -> StrokePath {
        StrokePath {
            points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            style: None,
        }
    }

    #[test]
    fn test_empty_session_produces_nothing() {
        let mut draft = DraftAccumulator::new(1);
        assert_eq!(draft.state(), DraftState::Empty);
        assert!(draft.finish(&HeuristicMetrics).is_none());
        assert_eq!(draft.state(), DraftState::Empty);
    }

    #[test]
    fn test_commit_unions_sub_annotation_bounds() {
        let mut draft = DraftAccumulator::new(2);
        draft.add_stroke(stroke(&[(10.0, 10.0), (30.0, 20.0)]), StrokeStyle::default());
        draft.add_shape(RectAnnotation {
            start: Point::new(25.0, 5.0),
            end: Point::new(60.0, 45.0),
            style: StrokeStyle::default(),
        });
        assert_eq!(draft.state(), DraftState::Accumulating);

        let annotation = draft.finish(&HeuristicMetrics).unwrap();
        assert_eq!(annotation.page_number, 2);
        assert!(annotation.is_draft());
        assert_eq!(annotation.bounds, BoundingBox::new(10.0, 5.0, 60.0, 45.0));
        match &annotation.kind {
            AnnotationKind::Misc(misc) => assert_eq!(misc.parts.len(), 2),
            other => panic!("expected misc composite, got {}", other.page_type()),
        }
    }

    #[test]
    fn test_finish_resets_for_a_new_session() {
        let mut draft = DraftAccumulator::new(1);
        draft.add_stroke(stroke(&[(0.0, 0.0), (5.0, 5.0)]), StrokeStyle::default());
        assert!(draft.finish(&HeuristicMetrics).is_some());
        assert!(draft.is_empty());
        assert_eq!(draft.state(), DraftState::Empty);
        // A second commit with no new strokes produces nothing
        assert!(draft.finish(&HeuristicMetrics).is_none());
    }

    #[test]
    fn test_cancel_discards_everything() {
        let mut draft = DraftAccumulator::new(1);
        draft.add_stroke(stroke(&[(0.0, 0.0), (5.0, 5.0)]), StrokeStyle::default());
        draft.cancel();
        assert!(draft.is_empty());
        assert!(draft.finish(&HeuristicMetrics).is_none());
    }

    #[test]
    fn test_finish_with_thumbnail_attaches_capture() {
        let mut draft = DraftAccumulator::new(1);
        draft.add_stroke(stroke(&[(10.0, 10.0), (40.0, 40.0)]), StrokeStyle::default());
        let vp = Viewport::new(CanvasSize::new(100.0, 100.0), 1.0, Rotation::R0).unwrap();
        let background = RgbaImage::new(100, 100);
        let annotation = draft
            .finish_with_thumbnail(&HeuristicMetrics, &vp, &background, None)
            .unwrap();
        let thumbnail = annotation.thumbnail.expect("thumbnail attached");
        assert!(thumbnail.starts_with("data:image/png;base64,"));
    }
}
