//! Stroke color and style types

use serde::{Deserialize, Serialize};

/// Serializable color with components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for Color {
    fn default() -> Self {
        // Default red matching the stock marker color
        Self {
            r: 0.9,
            g: 0.1,
            b: 0.1,
        }
    }
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert to image crate RGBA format (0-255), fully opaque
    pub fn to_rgba_u8(self) -> [u8; 4] {
        self.to_rgba_u8_with(1.0)
    }

    /// Convert to image crate RGBA format (0-255) with the given alpha
    pub fn to_rgba_u8_with(self, alpha: f32) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// Stroke style carried by an annotation
///
/// The width is stored at scale 1 and must be multiplied by the current
/// scale before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: crate::config::DEFAULT_STROKE_WIDTH,
            opacity: None,
        }
    }
}

impl StrokeStyle {
    /// Effective alpha for drawing
    pub fn alpha(&self) -> f32 {
        self.opacity.unwrap_or(1.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgba_u8() {
        let c = Color::new(1.0, 0.5, 0.0);
        assert_eq!(c.to_rgba_u8(), [255, 128, 0, 255]);
        assert_eq!(c.to_rgba_u8_with(0.5)[3], 128);
    }

    #[test]
    fn test_alpha_clamped() {
        let mut style = StrokeStyle::default();
        assert_eq!(style.alpha(), 1.0);
        style.opacity = Some(1.7);
        assert_eq!(style.alpha(), 1.0);
        style.opacity = Some(0.4);
        assert_eq!(style.alpha(), 0.4);
    }
}
