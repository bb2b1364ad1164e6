//! Bounding-box computation for every annotation variant
//!
//! Boxes are computed and stored in normalized space. Screen-space padding
//! and clamping happen only when deriving a capture region, and the result
//! is re-normalized before anything is persisted.

use crate::domain::{Annotation, AnnotationKind, BoundingBox, Point};
use crate::render::geometry;
use crate::text::TextMetrics;
use crate::viewport::Viewport;

/// Compute the minimal normalized-space box enclosing an annotation.
///
/// Extension-line boxes depend on the measured label width; pass the
/// drawing surface as `metrics` when one is available, or
/// [`HeuristicMetrics`](crate::text::HeuristicMetrics) otherwise.
pub fn compute_bounds(kind: &AnnotationKind, metrics: &dyn TextMetrics) -> BoundingBox {
    match kind {
        AnnotationKind::Freehand(freehand) => BoundingBox::from_points(
            freehand.paths.iter().flat_map(|p| p.points.iter().copied()),
        )
        .unwrap_or(BoundingBox::EMPTY),

        AnnotationKind::Rectangle(rect)
        | AnnotationKind::DrawArea(rect)
        | AnnotationKind::RectSelection(rect) => BoundingBox::from_corners(rect.start, rect.end),

        AnnotationKind::TextArea(area) => BoundingBox::from_corners(area.start, area.end),

        AnnotationKind::Image(img) => BoundingBox::from_corners(img.start, img.end),

        AnnotationKind::Line(line) => BoundingBox::from_points(segment_points(&line.segments))
            .unwrap_or(BoundingBox::EMPTY),

        AnnotationKind::TextUnderline(markup) | AnnotationKind::TextCrossedOut(markup) => {
            BoundingBox::from_points(segment_points(&markup.segments))
                .unwrap_or(BoundingBox::EMPTY)
        }

        AnnotationKind::TextHighlight(highlight) => highlight
            .rects
            .iter()
            .copied()
            .reduce(|a, b| a.union(b))
            .unwrap_or(BoundingBox::EMPTY),

        AnnotationKind::ExtensionLine(ext) => {
            let layout = geometry::tail_layout(ext.pin, ext.bend, &ext.text, metrics);
            let mut bounds = BoundingBox::from_corners(ext.pin, layout.bend);
            bounds.include(layout.end);
            bounds.include(layout.label.top_left());
            bounds.include(layout.label.bottom_right());
            bounds
        }

        // The one variant where a zero-area box is legal
        AnnotationKind::PinSelection(pin) => {
            BoundingBox::from_corners(pin.position, pin.position)
        }

        AnnotationKind::Misc(misc) => misc
            .parts
            .iter()
            .map(|part| compute_bounds(part, metrics))
            .reduce(|a, b| a.union(b))
            .unwrap_or(BoundingBox::EMPTY),

        // Unknown variants keep the box their producer stored in the envelope
        AnnotationKind::Other { .. } => BoundingBox::EMPTY,
    }
}

fn segment_points(
    segments: &[crate::domain::LineSegment],
) -> impl Iterator<Item = Point> + '_ {
    segments.iter().flat_map(|s| [s.start, s.end])
}

/// Screen-space capture region for a normalized bounding box: transformed,
/// padded by the capture margin and clamped to the canvas.
pub fn capture_box(bounds: &BoundingBox, viewport: &Viewport) -> BoundingBox {
    let a = viewport.to_screen(bounds.top_left());
    let b = viewport.to_screen(bounds.bottom_right());
    BoundingBox::from_corners(a, b)
        .padded(geometry::capture::MARGIN)
        .clamped(viewport.size().width, viewport.size().height)
}

/// The capture region of [`capture_box`] re-normalized for storage.
pub fn stored_capture_box(bounds: &BoundingBox, viewport: &Viewport) -> BoundingBox {
    let screen = capture_box(bounds, viewport);
    let a = viewport.to_normalized(screen.top_left());
    let b = viewport.to_normalized(screen.bottom_right());
    BoundingBox::from_corners(a, b)
}

/// True when a finalized annotation's box still encloses every constituent
/// point. Used by callers as a commit-time sanity check.
pub fn bounds_contain(annotation: &Annotation, metrics: &dyn TextMetrics) -> bool {
    let computed = compute_bounds(&annotation.kind, metrics);
    annotation.bounds.left <= computed.left
        && annotation.bounds.top <= computed.top
        && annotation.bounds.right >= computed.right
        && annotation.bounds.bottom >= computed.bottom
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Color, ExtensionLineAnnotation, FreehandAnnotation, HighlightAnnotation, LineAnnotation,
        LineSegment, MiscAnnotation, PinAnnotation, RectAnnotation, StrokePath, StrokeStyle,
    };
    use crate::render::geometry::extension;
    use crate::text::HeuristicMetrics;
    use crate::viewport::{CanvasSize, Rotation};

    fn freehand(points: &[(f64, f64)]) -> AnnotationKind {
        AnnotationKind::Freehand(FreehandAnnotation {
            paths: vec![StrokePath {
                points: points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
                style: None,
            }],
            style: StrokeStyle::default(),
        })
    }

    #[test]
    fn test_freehand_bounds_contain_all_points() {
        let points = [(50.0, 50.0), (75.0, 50.0), (75.0, 75.0), (60.0, 90.0)];
        let bounds = compute_bounds(&freehand(&points), &HeuristicMetrics);
        assert_eq!(bounds, BoundingBox::new(50.0, 50.0, 75.0, 90.0));
        for (x, y) in points {
            assert!(bounds.contains(Point::new(x, y)));
        }
    }

    #[test]
    fn test_corner_pair_bounds() {
        let kind = AnnotationKind::Rectangle(RectAnnotation {
            start: Point::new(90.0, 10.0),
            end: Point::new(20.0, 70.0),
            style: StrokeStyle::default(),
        });
        assert_eq!(
            compute_bounds(&kind, &HeuristicMetrics),
            BoundingBox::new(20.0, 10.0, 90.0, 70.0)
        );
    }

    #[test]
    fn test_line_segment_bounds() {
        let kind = AnnotationKind::Line(LineAnnotation {
            segments: vec![
                LineSegment {
                    start: Point::new(0.0, 5.0),
                    end: Point::new(10.0, 5.0),
                    style: None,
                },
                LineSegment {
                    start: Point::new(4.0, -2.0),
                    end: Point::new(4.0, 9.0),
                    style: None,
                },
            ],
            style: StrokeStyle::default(),
        });
        assert_eq!(
            compute_bounds(&kind, &HeuristicMetrics),
            BoundingBox::new(0.0, -2.0, 10.0, 9.0)
        );
    }

    #[test]
    fn test_highlight_union() {
        let kind = AnnotationKind::TextHighlight(HighlightAnnotation {
            rects: vec![
                BoundingBox::new(10.0, 10.0, 60.0, 22.0),
                BoundingBox::new(10.0, 26.0, 45.0, 38.0),
            ],
            style: StrokeStyle::default(),
            opacity: None,
        });
        assert_eq!(
            compute_bounds(&kind, &HeuristicMetrics),
            BoundingBox::new(10.0, 10.0, 60.0, 38.0)
        );
    }

    #[test]
    fn test_pin_degenerate_box_is_legal() {
        let kind = AnnotationKind::PinSelection(PinAnnotation {
            position: Point::new(33.0, 44.0),
            color: None,
        });
        let bounds = compute_bounds(&kind, &HeuristicMetrics);
        assert_eq!(bounds, BoundingBox::new(33.0, 44.0, 33.0, 44.0));
        assert_eq!(bounds.area(), 0.0);
    }

    fn extension(text: &str) -> AnnotationKind {
        AnnotationKind::ExtensionLine(ExtensionLineAnnotation {
            pin: Point::new(300.0, 100.0),
            bend: Some(Point::new(250.0, 100.0)),
            text: text.to_string(),
            color: Color::default(),
        })
    }

    #[test]
    fn test_extension_line_encloses_tail_and_label() {
        let bounds = compute_bounds(&extension("A"), &HeuristicMetrics);
        // Leftward tail of default length from the bend
        assert_eq!(bounds.left, 250.0 - extension::DEFAULT_TAIL);
        assert_eq!(bounds.right, 300.0);
        assert_eq!(bounds.top, 100.0 - extension::LABEL_HEIGHT / 2.0);
        assert_eq!(bounds.bottom, 100.0 + extension::LABEL_HEIGHT / 2.0);
    }

    #[test]
    fn test_extension_line_edge_monotonic_in_text_width() {
        let mut prev_left = f64::INFINITY;
        for n in [1usize, 8, 16, 32] {
            let bounds = compute_bounds(&extension(&"x".repeat(n)), &HeuristicMetrics);
            assert!(bounds.left <= prev_left, "left edge receded at {n} chars");
            prev_left = bounds.left;
        }
    }

    #[test]
    fn test_misc_union_and_empty_collapse() {
        let composite = AnnotationKind::Misc(MiscAnnotation {
            parts: vec![
                freehand(&[(10.0, 10.0), (20.0, 30.0)]),
                AnnotationKind::Rectangle(RectAnnotation {
                    start: Point::new(15.0, 5.0),
                    end: Point::new(40.0, 25.0),
                    style: StrokeStyle::default(),
                }),
            ],
        });
        assert_eq!(
            compute_bounds(&composite, &HeuristicMetrics),
            BoundingBox::new(10.0, 5.0, 40.0, 30.0)
        );

        let empty = AnnotationKind::Misc(MiscAnnotation::default());
        assert_eq!(compute_bounds(&empty, &HeuristicMetrics), BoundingBox::EMPTY);
    }

    #[test]
    fn test_capture_box_pads_and_clamps() {
        let vp = Viewport::new(CanvasSize::new(200.0, 200.0), 2.0, Rotation::R0).unwrap();
        let bounds = BoundingBox::new(0.0, 0.0, 95.0, 40.0);
        let screen = capture_box(&bounds, &vp);
        // 0..190 x 0..80 in screen pixels, padded by 20 and clamped
        assert_eq!(screen, BoundingBox::new(0.0, 0.0, 200.0, 100.0));
    }

    #[test]
    fn test_stored_capture_box_is_renormalized() {
        let vp = Viewport::new(CanvasSize::new(200.0, 200.0), 2.0, Rotation::R0).unwrap();
        let bounds = BoundingBox::new(30.0, 30.0, 50.0, 50.0);
        let stored = stored_capture_box(&bounds, &vp);
        // 20px screen margin is 10 normalized units at scale 2
        assert_eq!(stored, BoundingBox::new(20.0, 20.0, 60.0, 60.0));
    }

    #[test]
    fn test_capture_box_under_rotation() {
        let vp = Viewport::new(CanvasSize::new(200.0, 100.0), 1.0, Rotation::R90).unwrap();
        let bounds = BoundingBox::new(10.0, 20.0, 30.0, 60.0);
        let screen = capture_box(&bounds, &vp);
        // Corners map to (180,10) and (140,30); padded by 20
        assert_eq!(screen, BoundingBox::new(120.0, 0.0, 200.0, 50.0));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{FreehandAnnotation, StrokePath, StrokeStyle};
    use crate::text::HeuristicMetrics;
    use proptest::prelude::*;

    proptest! {
        /// Property: every constituent point of a freehand drawing lies
        /// within its computed bounding box.
        #[test]
        fn freehand_bounds_contain_every_point(
            raw in prop::collection::vec((0.0f64..1000.0, 0.0f64..1000.0), 1..40),
        ) {
            let points: Vec<Point> = raw.iter().map(|&(x, y)| Point::new(x, y)).collect();
            let kind = AnnotationKind::Freehand(FreehandAnnotation {
                paths: vec![StrokePath {
                    points: points.clone(),
                    style: None,
                }],
                style: StrokeStyle::default(),
            });
            let bounds = compute_bounds(&kind, &HeuristicMetrics);
            for p in &points {
                prop_assert!(bounds.contains(*p), "{p:?} escapes {bounds:?}");
            }
        }
    }
}
