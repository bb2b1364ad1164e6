//! Per-variant annotation rendering
//!
//! `render` reconstructs pixel-accurate drawings from normalized geometry
//! at the viewport's current zoom and rotation. Every normalized point is
//! transformed through the viewport before any drawing primitive is
//! issued, and every stored stroke width is multiplied by the scale.
//! Rendering retains no state between calls.

pub mod geometry;
pub mod surface;

use crate::config;
use crate::domain::{
    Annotation, AnnotationKind, Color, ExtensionLineAnnotation, FreehandAnnotation,
    HighlightAnnotation, ImageAnnotation, LineSegment, Point, RectAnnotation, StrokeStyle,
    TextAreaAnnotation,
};
use crate::text::{self, wrap_text};
use crate::viewport::Viewport;

use geometry::{extension, normalize_rect, pin};
use surface::Surface;

/// Draw one annotation onto the surface for the given viewport.
pub fn render(surface: &mut dyn Surface, annotation: &Annotation, viewport: &Viewport) {
    render_kind(surface, &annotation.kind, viewport);
}

/// Draw a bare annotation variant (used for drafts and composites).
pub fn render_kind(
    surface: &mut dyn Surface,
    kind: &AnnotationKind,
    viewport: &Viewport,
) {
    match kind {
        AnnotationKind::Freehand(freehand) => draw_freehand(surface, freehand, viewport),
        AnnotationKind::Rectangle(rect)
        | AnnotationKind::DrawArea(rect)
        | AnnotationKind::RectSelection(rect) => draw_rect_outline(surface, rect, viewport),
        AnnotationKind::TextArea(area) => draw_text_area(surface, area, viewport),
        AnnotationKind::Image(img) => draw_image_annotation(surface, img, viewport),
        AnnotationKind::Line(line) => {
            draw_segments(surface, &line.segments, &line.style, viewport)
        }
        AnnotationKind::TextUnderline(markup) | AnnotationKind::TextCrossedOut(markup) => {
            draw_segments(surface, &markup.segments, &markup.style, viewport)
        }
        AnnotationKind::TextHighlight(highlight) => draw_highlight(surface, highlight, viewport),
        AnnotationKind::ExtensionLine(ext) => draw_extension_line(surface, ext, viewport),
        AnnotationKind::PinSelection(pin_ann) => {
            draw_pin_marker(surface, pin_ann.position, pin_ann.color, viewport)
        }
        AnnotationKind::Misc(misc) => {
            for part in &misc.parts {
                render_kind(surface, part, viewport);
            }
        }
        AnnotationKind::Other { page_type, .. } => {
            // Forward-compatibility: newer producers may write variants this
            // renderer does not know. Reported, not silently absorbed.
            log::warn!("skipping unknown annotation variant `{page_type}` at render time");
        }
    }
}

/// Draw a slice of annotations in caller-supplied order.
pub fn draw_annotations_in_order(
    surface: &mut dyn Surface,
    annotations: &[Annotation],
    viewport: &Viewport,
) {
    for annotation in annotations {
        render(surface, annotation, viewport);
    }
}

fn draw_freehand(
    surface: &mut dyn Surface,
    freehand: &FreehandAnnotation,
    viewport: &Viewport,
) {
    for path in &freehand.paths {
        if path.points.is_empty() {
            continue;
        }
        let style = path.style.unwrap_or(freehand.style);
        let points: Vec<Point> = path.points.iter().map(|&p| viewport.to_screen(p)).collect();
        surface.stroke_polyline(
            &points,
            viewport.to_screen_len(style.width),
            style.color,
            style.alpha(),
            false,
        );
    }
}

fn draw_rect_outline(
    surface: &mut dyn Surface,
    rect: &RectAnnotation,
    viewport: &Viewport,
) {
    // Both corners transform independently; width/height axes swap under
    // quarter-turn rotations, so they are re-derived from the transformed
    // corner delta.
    let (min_x, min_y, max_x, max_y) = transformed_rect(rect.start, rect.end, viewport);
    let corners = [
        Point::new(min_x, min_y),
        Point::new(max_x, min_y),
        Point::new(max_x, max_y),
        Point::new(min_x, max_y),
    ];
    surface.stroke_polyline(
        &corners,
        viewport.to_screen_len(rect.style.width),
        rect.style.color,
        rect.style.alpha(),
        true,
    );
}

fn draw_text_area(
    surface: &mut dyn Surface,
    area: &TextAreaAnnotation,
    viewport: &Viewport,
) {
    let rect = RectAnnotation {
        start: area.start,
        end: area.end,
        style: area.style,
    };
    draw_rect_outline(surface, &rect, viewport);

    let (min_x, min_y, max_x, max_y) = transformed_rect(area.start, area.end, viewport);
    let pad = viewport.to_screen_len(geometry::text_area::PAD);
    let font_px = viewport.to_screen_len(area.font_size) as f32;
    let available = ((max_x - min_x) - 2.0 * pad) as f32;
    if available <= 0.0 {
        return;
    }
    let line_height = font_px as f64 * geometry::text_area::LINE_HEIGHT;
    let mut y = min_y + pad;
    for line in wrap_text(&*surface, &area.text, font_px, available) {
        // Truncate once the next line would overflow the bottom edge
        if y + line_height > max_y - pad {
            break;
        }
        surface.fill_text(&line, min_x + pad, y, font_px, area.style.color);
        y += line_height;
    }
}

fn draw_image_annotation(
    surface: &mut dyn Surface,
    img: &ImageAnnotation,
    viewport: &Viewport,
) {
    let Some(decoded) = crate::capture::decode_png_data_url(&img.data) else {
        log::warn!("image annotation payload failed to decode, skipping");
        return;
    };
    let (min_x, min_y, max_x, max_y) = transformed_rect(img.start, img.end, viewport);
    surface.draw_image(&decoded, min_x, min_y, max_x - min_x, max_y - min_y);
}

fn draw_segments(
    surface: &mut dyn Surface,
    segments: &[LineSegment],
    default_style: &StrokeStyle,
    viewport: &Viewport,
) {
    for segment in segments {
        let style = segment.style.unwrap_or(*default_style);
        let points = [
            viewport.to_screen(segment.start),
            viewport.to_screen(segment.end),
        ];
        surface.stroke_polyline(
            &points,
            viewport.to_screen_len(style.width),
            style.color,
            style.alpha(),
            false,
        );
    }
}

fn draw_highlight(
    surface: &mut dyn Surface,
    highlight: &HighlightAnnotation,
    viewport: &Viewport,
) {
    let alpha = highlight
        .opacity
        .unwrap_or(config::highlight::DEFAULT_OPACITY);
    for rect in &highlight.rects {
        let (min_x, min_y, max_x, max_y) =
            transformed_rect(rect.top_left(), rect.bottom_right(), viewport);
        surface.fill_rect(
            min_x,
            min_y,
            max_x - min_x,
            max_y - min_y,
            highlight.style.color,
            alpha,
        );
    }
}

fn draw_extension_line(
    surface: &mut dyn Surface,
    ext: &ExtensionLineAnnotation,
    viewport: &Viewport,
) {
    let layout = geometry::tail_layout(ext.pin, ext.bend, &ext.text, &*surface);
    let pin_s = viewport.to_screen(ext.pin);
    let bend_s = viewport.to_screen(layout.bend);
    let end_s = viewport.to_screen(layout.end);
    let line_width = viewport.to_screen_len(extension::LINE_WIDTH);

    surface.stroke_polyline(&[end_s, bend_s, pin_s], line_width, ext.color, 1.0, false);

    // Arrowhead pointing at the pin, laid out in normalized space so it
    // rotates with the page
    if let Some((barb1, barb2)) = geometry::arrow_head(ext.pin, layout.bend) {
        let triangle = [
            pin_s,
            viewport.to_screen(barb1),
            viewport.to_screen(barb2),
        ];
        surface.fill_polygon(&triangle, ext.color, 1.0);
    }

    // Label: wrapped, centered above the tail on a contrast background
    let font_px = extension::FONT_PX * viewport.scale() as f32;
    let available = (viewport.to_screen_len(layout.length - 2.0 * extension::TEXT_PAD)) as f32;
    let lines = wrap_text(&*surface, &ext.text, font_px, available.max(1.0));
    if lines.is_empty() {
        draw_pin_head(surface, pin_s, ext.color, viewport);
        return;
    }

    let label_a = viewport.to_screen(layout.label.top_left());
    let label_b = viewport.to_screen(layout.label.bottom_right());
    let (min_x, min_y, max_x, max_y) = normalize_rect(label_a, label_b);
    let line_height = font_px as f64 * extension::LINE_HEIGHT;
    let top = min_y - (lines.len() as f64 - 1.0) * line_height;
    surface.fill_rounded_rect(
        min_x,
        top,
        max_x - min_x,
        max_y - top,
        viewport.to_screen_len(extension::LABEL_RADIUS),
        Color::WHITE,
        0.85,
    );
    for (i, line) in lines.iter().enumerate() {
        let line_width_px = text::measure_text(&*surface, line, font_px) as f64;
        let x = (min_x + max_x) / 2.0 - line_width_px / 2.0;
        let y = top + i as f64 * line_height + (line_height - font_px as f64) / 2.0;
        surface.fill_text(line, x, y, font_px, ext.color);
    }

    draw_pin_head(surface, pin_s, ext.color, viewport);
}

fn draw_pin_head(
    surface: &mut dyn Surface,
    center: Point,
    color: Color,
    viewport: &Viewport,
) {
    let radius = viewport.to_screen_len(extension::PIN_HEIGHT) / 2.0;
    surface.fill_circle(center, radius, color, 1.0);
}

fn draw_pin_marker(
    surface: &mut dyn Surface,
    position: Point,
    color: Option<Color>,
    viewport: &Viewport,
) {
    let center = viewport.to_screen(position);
    let color = color.unwrap_or_default();
    let radius = viewport.to_screen_len(pin::RADIUS);
    surface.fill_circle(center, radius, color, 1.0);
    surface.fill_circle(center, radius * 0.4, Color::WHITE, 1.0);
}

fn transformed_rect(start: Point, end: Point, viewport: &Viewport) -> (f64, f64, f64, f64) {
    normalize_rect(viewport.to_screen(start), viewport.to_screen(end))
}
