//! Default styles and caller-facing policy constants

use serde::{Deserialize, Serialize};

use crate::domain::{Color, StrokeStyle};

/// Interaction-layer policy constants
///
/// The engine itself never rejects geometry; these document the thresholds
/// the interaction layer is expected to enforce before constructing an
/// annotation.
pub mod interaction {
    use crate::domain::Point;

    /// Minimum drag extent per axis, in screen pixels. Drags shorter than
    /// this in both axes produce degenerate boxes and must be discarded
    /// before commit.
    pub const MIN_DRAG_PX: f64 = 8.0;

    /// Whether a drag between two screen points is large enough to commit
    pub fn meets_min_drag(start: Point, end: Point) -> bool {
        (end.x - start.x).abs() >= MIN_DRAG_PX || (end.y - start.y).abs() >= MIN_DRAG_PX
    }
}

/// Text highlight defaults
pub mod highlight {
    /// Fill opacity used when the annotation carries no override
    pub const DEFAULT_OPACITY: f32 = 0.35;
}

/// Default stroke width at scale 1, in normalized pixels
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Default font size for text areas at scale 1, in normalized pixels
pub const DEFAULT_FONT_SIZE: f64 = 14.0;

/// Built-in marker colors offered by the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerColor {
    #[default]
    Red,
    Yellow,
    Green,
    Blue,
    Black,
}

impl From<MarkerColor> for Color {
    fn from(m: MarkerColor) -> Self {
        match m {
            MarkerColor::Red => Color::new(0.9, 0.1, 0.1),
            MarkerColor::Yellow => Color::new(0.95, 0.85, 0.1),
            MarkerColor::Green => Color::new(0.1, 0.7, 0.2),
            MarkerColor::Blue => Color::new(0.15, 0.35, 0.9),
            MarkerColor::Black => Color::new(0.0, 0.0, 0.0),
        }
    }
}

/// Default style for a freshly selected drawing tool
pub fn default_style() -> StrokeStyle {
    StrokeStyle {
        color: Color::default(),
        width: DEFAULT_STROKE_WIDTH,
        opacity: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_colors_are_distinct() {
        let colors: Vec<Color> = [
            MarkerColor::Red,
            MarkerColor::Yellow,
            MarkerColor::Green,
            MarkerColor::Blue,
            MarkerColor::Black,
        ]
        .into_iter()
        .map(Color::from)
        .collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_default_style() {
        let style = default_style();
        assert_eq!(style.width, DEFAULT_STROKE_WIDTH);
        assert!(style.opacity.is_none());
    }

    #[test]
    fn test_min_drag_rejects_short_drags() {
        use crate::domain::Point;
        let start = Point::new(100.0, 100.0);
        assert!(!interaction::meets_min_drag(start, Point::new(105.0, 104.0)));
        assert!(interaction::meets_min_drag(start, Point::new(109.0, 100.0)));
        assert!(interaction::meets_min_drag(start, Point::new(100.0, 70.0)));
    }
}
