//! Drawing surface abstraction and the tiny-skia raster implementation
//!
//! Rendering is generic over [`Surface`] so the same dispatch code drives
//! the shipped raster backend and any host-provided canvas. All surface
//! coordinates are screen pixels; callers transform normalized geometry
//! first.

use image::RgbaImage;
use rusttype::{Font, Scale, point as rt_point};
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use crate::domain::{Color, Point};
use crate::error::Error;
use crate::render::geometry::BEZIER_K;
use crate::text::TextMetrics;

/// Drawing primitives the renderer needs from a canvas
///
/// Implementations also provide glyph metrics ([`TextMetrics`]); returning
/// `None` there makes the renderer fall back to its width heuristic.
pub trait Surface: TextMetrics {
    /// Stroke a polyline with round caps and joins
    fn stroke_polyline(
        &mut self,
        points: &[Point],
        width: f64,
        color: Color,
        opacity: f32,
        closed: bool,
    );

    /// Fill an axis-aligned rectangle
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, opacity: f32);

    /// Fill a rounded rectangle
    fn fill_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        color: Color,
        opacity: f32,
    );

    /// Fill a closed polygon
    fn fill_polygon(&mut self, points: &[Point], color: Color, opacity: f32);

    /// Fill a circle
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, opacity: f32);

    /// Blit a decoded raster into the destination rectangle, scaling to fit
    fn draw_image(&mut self, image: &RgbaImage, x: f64, y: f64, w: f64, h: f64);

    /// Draw one line of text with its top-left corner at `(x, y)`
    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_px: f32, color: Color);
}

/// Raster surface backed by a tiny-skia pixmap
pub struct PixmapSurface {
    pixmap: Pixmap,
    font: Option<Font<'static>>,
}

impl PixmapSurface {
    /// Create a transparent surface. Returns `None` for zero dimensions.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            font: None,
        })
    }

    /// Wrap a copy of an existing raster, e.g. a rendered page
    pub fn from_image(image: &RgbaImage) -> Option<Self> {
        let size = tiny_skia::IntSize::from_wh(image.width(), image.height())?;
        Some(Self {
            pixmap: Pixmap::from_vec(image.as_raw().clone(), size)?,
            font: None,
        })
    }

    /// Load a TTF/OTF blob for glyph metrics and text rasterization
    pub fn set_font(&mut self, data: Vec<u8>) -> Result<(), Error> {
        self.font = Some(Font::try_from_vec(data).ok_or(Error::BadFont)?);
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Copy the surface out as an image-crate buffer
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_raw(
            self.pixmap.width(),
            self.pixmap.height(),
            self.pixmap.data().to_vec(),
        )
        .unwrap()
    }

    fn paint(color: Color, opacity: f32) -> Paint<'static> {
        let [r, g, b, a] = color.to_rgba_u8_with(opacity);
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint
    }

    fn polyline_path(points: &[Point], closed: bool) -> Option<Path> {
        let (first, rest) = points.split_first()?;
        let mut pb = PathBuilder::new();
        pb.move_to(first.x as f32, first.y as f32);
        for p in rest {
            pb.line_to(p.x as f32, p.y as f32);
        }
        if closed {
            pb.close();
        }
        pb.finish()
    }

    /// Circle path from cubic beziers
    fn circle_path(cx: f64, cy: f64, r: f64) -> Option<Path> {
        let (cx, cy, r) = (cx as f32, cy as f32, r as f32);
        let k = r * BEZIER_K as f32;
        let mut pb = PathBuilder::new();
        pb.move_to(cx, cy - r);
        pb.cubic_to(cx + k, cy - r, cx + r, cy - k, cx + r, cy);
        pb.cubic_to(cx + r, cy + k, cx + k, cy + r, cx, cy + r);
        pb.cubic_to(cx - k, cy + r, cx - r, cy + k, cx - r, cy);
        pb.cubic_to(cx - r, cy - k, cx - k, cy - r, cx, cy - r);
        pb.close();
        pb.finish()
    }

    fn rounded_rect_path(x: f64, y: f64, w: f64, h: f64, radius: f64) -> Option<Path> {
        let r = radius.min(w / 2.0).min(h / 2.0).max(0.0) as f32;
        let (x, y, w, h) = (x as f32, y as f32, w as f32, h as f32);
        let k = r * (1.0 - BEZIER_K as f32);
        let (x2, y2) = (x + w, y + h);
        let mut pb = PathBuilder::new();
        pb.move_to(x + r, y);
        pb.line_to(x2 - r, y);
        pb.cubic_to(x2 - k, y, x2, y + k, x2, y + r);
        pb.line_to(x2, y2 - r);
        pb.cubic_to(x2, y2 - k, x2 - k, y2, x2 - r, y2);
        pb.line_to(x + r, y2);
        pb.cubic_to(x + k, y2, x, y2 - k, x, y2 - r);
        pb.line_to(x, y + r);
        pb.cubic_to(x, y + k, x + k, y, x + r, y);
        pb.close();
        pb.finish()
    }
}

impl TextMetrics for PixmapSurface {
    fn text_width(&self, text: &str, font_px: f32) -> Option<f32> {
        let font = self.font.as_ref()?;
        let scale = Scale::uniform(font_px);
        let width = font
            .layout(text, scale, rt_point(0.0, 0.0))
            .map(|g| g.unpositioned().h_metrics().advance_width)
            .sum::<f32>();
        Some(width)
    }
}

impl Surface for PixmapSurface {
    fn stroke_polyline(
        &mut self,
        points: &[Point],
        width: f64,
        color: Color,
        opacity: f32,
        closed: bool,
    ) {
        let Some(path) = Self::polyline_path(points, closed) else {
            return;
        };
        let paint = Self::paint(color, opacity);
        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color, opacity: f32) {
        let Some(rect) = tiny_skia::Rect::from_xywh(x as f32, y as f32, w as f32, h as f32)
        else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &Self::paint(color, opacity), Transform::identity(), None);
    }

    fn fill_rounded_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        radius: f64,
        color: Color,
        opacity: f32,
    ) {
        let Some(path) = Self::rounded_rect_path(x, y, w, h, radius) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &Self::paint(color, opacity),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color, opacity: f32) {
        let Some(path) = Self::polyline_path(points, true) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &Self::paint(color, opacity),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color, opacity: f32) {
        let Some(path) = Self::circle_path(center.x, center.y, radius) else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &Self::paint(color, opacity),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn draw_image(&mut self, image: &RgbaImage, x: f64, y: f64, w: f64, h: f64) {
        if w <= 0.0 || h <= 0.0 || image.width() == 0 || image.height() == 0 {
            return;
        }
        let Some(size) = tiny_skia::IntSize::from_wh(image.width(), image.height()) else {
            return;
        };
        let Some(src) = Pixmap::from_vec(image.as_raw().clone(), size) else {
            return;
        };
        let sx = (w / image.width() as f64) as f32;
        let sy = (h / image.height() as f64) as f32;
        let transform = Transform::from_row(sx, 0.0, 0.0, sy, x as f32, y as f32);
        self.pixmap
            .draw_pixmap(0, 0, src.as_ref(), &PixmapPaint::default(), transform, None);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, font_px: f32, color: Color) {
        let Some(font) = self.font.as_ref() else {
            // Without a font the label layout still happened through the
            // metrics fallback; glyphs are simply not rasterized.
            log::debug!("no font loaded, skipping text raster");
            return;
        };
        let scale = Scale::uniform(font_px);
        let ascent = font.v_metrics(scale).ascent;
        let glyphs: Vec<_> = font
            .layout(text, scale, rt_point(x as f32, y as f32 + ascent))
            .collect();

        let [r, g, b, _] = color.to_rgba_u8();
        let width = self.pixmap.width() as i32;
        let height = self.pixmap.height() as i32;
        let data = self.pixmap.data_mut();
        for glyph in glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px < 0 || py < 0 || px >= width || py >= height || coverage <= 0.0 {
                    return;
                }
                let idx = ((py * width + px) * 4) as usize;
                let alpha = coverage.clamp(0.0, 1.0);
                let inv = 1.0 - alpha;
                data[idx] = (r as f32 * alpha + data[idx] as f32 * inv).round() as u8;
                data[idx + 1] = (g as f32 * alpha + data[idx + 1] as f32 * inv).round() as u8;
                data[idx + 2] = (b as f32 * alpha + data[idx + 2] as f32 * inv).round() as u8;
                data[idx + 3] =
                    (255.0 * alpha + data[idx + 3] as f32 * inv).round() as u8;
            });
        }
    }
}
