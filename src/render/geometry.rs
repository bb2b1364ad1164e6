//! Shared geometry calculations for annotation layout
//!
//! This module contains constants and math shared between bounding-box
//! computation and rendering, so both always agree on where a callout's
//! tail and label end up.

use crate::domain::{BoundingBox, Point};
use crate::text::{self, TextMetrics};

/// Extension-line (callout) geometry constants
pub mod extension {
    /// Pin marker size in normalized pixels (width x height)
    pub const PIN_WIDTH: f64 = 12.0;
    pub const PIN_HEIGHT: f64 = 5.0;
    /// Default tail length in normalized pixels
    pub const DEFAULT_TAIL: f64 = PIN_WIDTH * 5.0;
    /// Horizontal padding between label text and tail ends
    pub const TEXT_PAD: f64 = 6.0;
    /// Vertical extent of the label band around the tail line
    pub const LABEL_HEIGHT: f64 = 16.0;
    /// Label font size in normalized pixels (rendered bold)
    pub const FONT_PX: f32 = 11.0;
    /// Corner radius of the label background
    pub const LABEL_RADIUS: f64 = 4.0;
    /// Line height factor for wrapped label text
    pub const LINE_HEIGHT: f64 = 1.25;
    /// Stroke width of pin-to-bend and tail segments at scale 1
    pub const LINE_WIDTH: f64 = 1.5;
}

/// Arrowhead geometry constants
pub mod arrow {
    /// Head length as a fraction of the segment length
    pub const HEAD_RATIO: f64 = 0.25;
    /// Maximum head length in normalized pixels
    pub const MAX_HEAD: f64 = 15.0;
    /// Head width as a fraction of head length
    pub const HEAD_WIDTH_RATIO: f64 = 0.4;
}

/// Pin selection marker constants
pub mod pin {
    /// Marker radius in normalized pixels
    pub const RADIUS: f64 = 6.0;
}

/// Capture-region constants
pub mod capture {
    /// Margin added around a bounding box in screen pixels before capture
    pub const MARGIN: f64 = 20.0;
}

/// Text area layout constants
pub mod text_area {
    /// Inner padding between the rectangle edge and wrapped text
    pub const PAD: f64 = 4.0;
    /// Line height factor for wrapped text
    pub const LINE_HEIGHT: f64 = 1.2;
}

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(a: Point, b: Point) -> (f64, f64, f64, f64) {
    (
        a.x.min(b.x),
        a.y.min(b.y),
        a.x.max(b.x),
        a.y.max(b.y),
    )
}

/// Ellipse bezier approximation constant: 4/3 * (sqrt(2) - 1)
pub const BEZIER_K: f64 = 0.552_284_8;

/// Resolved extension-line layout in normalized space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TailLayout {
    /// Bend point (the pin itself when the annotation has none)
    pub bend: Point,
    /// Tail direction: -1 leftward, +1 rightward
    pub direction: f64,
    /// Tail length along the direction
    pub length: f64,
    /// End of the horizontal tail
    pub end: Point,
    /// Label band straddling the tail line
    pub label: BoundingBox,
}

/// Lay out a callout tail and label from its pin and bend points.
///
/// Tail length is the default unless the measured label text (plus padding
/// on both ends) needs more room. The tail points away from the pin: when
/// the pin sits to the right of the bend the tail extends leftward.
pub fn tail_layout(
    pin: Point,
    bend: Option<Point>,
    label_text: &str,
    metrics: &dyn TextMetrics,
) -> TailLayout {
    let bend = bend.unwrap_or(pin);
    let text_width = text::measure_text(metrics, label_text, extension::FONT_PX) as f64;
    let length = extension::DEFAULT_TAIL.max(text_width + 2.0 * extension::TEXT_PAD);
    let direction = if pin.x > bend.x { -1.0 } else { 1.0 };
    let end = Point::new(bend.x + direction * length, bend.y);
    let label = BoundingBox::new(
        bend.x.min(end.x),
        bend.y - extension::LABEL_HEIGHT / 2.0,
        bend.x.max(end.x),
        bend.y + extension::LABEL_HEIGHT / 2.0,
    );
    TailLayout {
        bend,
        direction,
        length,
        end,
        label,
    }
}

/// Arrowhead barbs for a head sitting at `tip`, approached from `from`.
///
/// Head length is a quarter of the segment, capped; head width is 0.4x the
/// length. Returns `None` for a degenerate segment.
pub fn arrow_head(tip: Point, from: Point) -> Option<(Point, Point)> {
    let dx = tip.x - from.x;
    let dy = tip.y - from.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length < f64::EPSILON {
        return None;
    }
    let nx = dx / length;
    let ny = dy / length;
    let head_len = (length * arrow::HEAD_RATIO).min(arrow::MAX_HEAD);
    let half_width = head_len * arrow::HEAD_WIDTH_RATIO / 2.0;

    // Base of the head, then offset along the perpendicular
    let bx = tip.x - nx * head_len;
    let by = tip.y - ny * head_len;
    let px = -ny * half_width;
    let py = nx * half_width;
    Some((Point::new(bx + px, by + py), Point::new(bx - px, by - py)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::HeuristicMetrics;

    #[test]
    fn test_normalize_rect() {
        let (min_x, min_y, max_x, max_y) =
            normalize_rect(Point::new(5.0, 1.0), Point::new(2.0, 9.0));
        assert_eq!((min_x, min_y, max_x, max_y), (2.0, 1.0, 5.0, 9.0));
    }

    #[test]
    fn test_short_text_uses_default_tail() {
        let layout = tail_layout(
            Point::new(300.0, 100.0),
            Some(Point::new(250.0, 100.0)),
            "A",
            &HeuristicMetrics,
        );
        assert_eq!(layout.length, extension::DEFAULT_TAIL);
        assert_eq!(layout.direction, -1.0);
        assert_eq!(layout.end, Point::new(190.0, 100.0));
    }

    #[test]
    fn test_long_text_extends_tail() {
        let text = "A very long label string";
        let layout = tail_layout(
            Point::new(300.0, 100.0),
            Some(Point::new(250.0, 100.0)),
            text,
            &HeuristicMetrics,
        );
        let expected = text.chars().count() as f64 * 8.0 + 2.0 * extension::TEXT_PAD;
        assert_eq!(layout.length, expected);
        assert!(layout.length > extension::DEFAULT_TAIL);
    }

    #[test]
    fn test_tail_direction_rightward() {
        let layout = tail_layout(
            Point::new(100.0, 50.0),
            Some(Point::new(150.0, 50.0)),
            "x",
            &HeuristicMetrics,
        );
        assert_eq!(layout.direction, 1.0);
        assert!(layout.end.x > 150.0);
    }

    #[test]
    fn test_missing_bend_degenerates_to_pin() {
        let pin = Point::new(10.0, 20.0);
        let layout = tail_layout(pin, None, "x", &HeuristicMetrics);
        assert_eq!(layout.bend, pin);
        assert_eq!(layout.direction, 1.0);
    }

    #[test]
    fn test_tail_monotonic_in_text_length() {
        let pin = Point::new(300.0, 100.0);
        let bend = Some(Point::new(250.0, 100.0));
        let mut prev = 0.0;
        for n in [1usize, 5, 10, 20, 40] {
            let text: String = "x".repeat(n);
            let layout = tail_layout(pin, bend, &text, &HeuristicMetrics);
            assert!(layout.length >= prev, "tail shrank at {n} chars");
            prev = layout.length;
        }
    }

    #[test]
    fn test_arrow_head_capped() {
        let (b1, b2) = arrow_head(Point::new(100.0, 0.0), Point::new(0.0, 0.0)).unwrap();
        // Segment of 100px caps the head at 15px behind the tip
        assert!((b1.x - 85.0).abs() < 1e-9);
        assert!((b2.x - 85.0).abs() < 1e-9);
        assert!((b1.y + b2.y).abs() < 1e-9);
        let width = (b1.y - b2.y).abs();
        assert!((width - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_arrow_head_short_segment() {
        let (b1, _) = arrow_head(Point::new(20.0, 0.0), Point::new(0.0, 0.0)).unwrap();
        // 20px segment: head length 5px
        assert!((b1.x - 15.0).abs() < 1e-9);
        assert!(arrow_head(Point::new(1.0, 1.0), Point::new(1.0, 1.0)).is_none());
    }
}
