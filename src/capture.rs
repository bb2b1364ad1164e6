//! Region capture: flattening a page sub-rectangle into a thumbnail
//!
//! The background surface and the live annotation layer may have different
//! backing pixel densities; the annotation layer's per-axis pixel ratio is
//! computed from the two surfaces' actual dimensions and applied to its
//! *source* rectangle only, so the output stays in background pixels.
//!
//! Capture failures never invalidate an annotation: every failing step
//! degrades to a partial result (background only) or `None`, and the
//! annotation remains persistable without a thumbnail.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};

use crate::domain::BoundingBox;

/// Capture a screen-space region of the rendered page, optionally
/// compositing the annotation layer on top, as a PNG data URL.
pub fn capture_region(
    background: &RgbaImage,
    annotation_layer: Option<&RgbaImage>,
    region: &BoundingBox,
    include_annotations: bool,
) -> Option<String> {
    let Some((x, y, w, h)) = pixel_rect(region, background.width(), background.height()) else {
        log::warn!(
            "capture region {:?} is outside the {}x{} background",
            region,
            background.width(),
            background.height()
        );
        return None;
    };

    let mut out = imageops::crop_imm(background, x, y, w, h).to_image();

    if include_annotations {
        if let Some(layer) = annotation_layer {
            composite_annotation_layer(&mut out, layer, background, x, y, w, h);
        }
    }

    encode_png_data_url(&out)
}

/// Overlay the matching annotation sub-rectangle, scaled by the layer's
/// per-axis pixel ratio relative to the background.
fn composite_annotation_layer(
    out: &mut RgbaImage,
    layer: &RgbaImage,
    background: &RgbaImage,
    x: u32,
    y: u32,
    w: u32,
    h: u32,
) {
    if layer.width() == 0 || layer.height() == 0 {
        return;
    }
    let ratio_x = layer.width() as f64 / background.width() as f64;
    let ratio_y = layer.height() as f64 / background.height() as f64;

    let src_x = ((x as f64 * ratio_x).round() as u32).min(layer.width().saturating_sub(1));
    let src_y = ((y as f64 * ratio_y).round() as u32).min(layer.height().saturating_sub(1));
    let src_w = ((w as f64 * ratio_x).round() as u32)
        .clamp(1, layer.width() - src_x);
    let src_h = ((h as f64 * ratio_y).round() as u32)
        .clamp(1, layer.height() - src_y);

    let cropped = imageops::crop_imm(layer, src_x, src_y, src_w, src_h).to_image();
    let resized = if (src_w, src_h) == (w, h) {
        cropped
    } else {
        imageops::resize(&cropped, w, h, FilterType::Triangle)
    };
    imageops::overlay(out, &resized, 0, 0);
}

/// Integer pixel rectangle of a screen-space box, clamped to the surface.
/// Returns `None` when the clamped region is empty.
fn pixel_rect(region: &BoundingBox, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    let left = region.left.max(0.0).floor() as u32;
    let top = region.top.max(0.0).floor() as u32;
    let right = (region.right.ceil().max(0.0) as u32).min(width);
    let bottom = (region.bottom.ceil().max(0.0) as u32).min(height);
    if left >= right || top >= bottom {
        return None;
    }
    Some((left, top, right - left, bottom - top))
}

/// Encode a raster as a `data:image/png;base64,` URL.
pub fn encode_png_data_url(image: &RgbaImage) -> Option<String> {
    let mut buf = Vec::new();
    if let Err(err) = image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png) {
        log::warn!("thumbnail encode failed: {err}");
        return None;
    }
    Some(format!("data:image/png;base64,{}", BASE64.encode(&buf)))
}

/// Decode a base64 raster payload, with or without a data-URL prefix.
pub fn decode_png_data_url(data: &str) -> Option<RgbaImage> {
    let encoded = data.rsplit(',').next().unwrap_or(data);
    let bytes = match BASE64.decode(encoded.trim()) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!("raster payload is not valid base64: {err}");
            return None;
        }
    };
    match image::load_from_memory(&bytes) {
        Ok(decoded) => {
            let rgba = decoded.to_rgba8();
            log::debug!("decoded raster payload: {}x{}", rgba.width(), rgba.height());
            Some(rgba)
        }
        Err(err) => {
            log::warn!("raster payload failed to decode: {err}");
            None
        }
    }
}
