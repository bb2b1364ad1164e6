//! Persisted wire format for annotations
//!
//! Two-tier shape: a fixed envelope (`id`, `pageType`, `pageNumber`,
//! `thumbnail`, `boundingBox`) plus one opaque structured `payload`
//! carrying the variant-specific geometry. The pair round-trips
//! losslessly, including records whose `pageType` this build does not
//! recognize.

use serde_json::{Value, json};

use crate::domain::{Annotation, AnnotationKind, MiscAnnotation};
use crate::error::Error;

/// Serialize an annotation into its wire envelope.
pub fn to_wire(annotation: &Annotation) -> Result<Value, Error> {
    Ok(json!({
        "id": annotation.id,
        "pageType": annotation.kind.page_type(),
        "pageNumber": annotation.page_number,
        "thumbnail": annotation.thumbnail,
        "boundingBox": serde_json::to_value(annotation.bounds)?,
        "payload": kind_payload(&annotation.kind)?,
    }))
}

/// Serialize an annotation to a JSON string.
pub fn to_wire_string(annotation: &Annotation) -> Result<String, Error> {
    Ok(serde_json::to_string(&to_wire(annotation)?)?)
}

/// Reconstruct an annotation from its wire envelope.
pub fn from_wire(value: &Value) -> Result<Annotation, Error> {
    let id = str_field(value, "id")?.to_string();
    let page_type = str_field(value, "pageType")?;
    let page_number = value
        .get("pageNumber")
        .and_then(Value::as_u64)
        .ok_or(Error::MissingField("pageNumber"))? as u32;
    let thumbnail = value
        .get("thumbnail")
        .and_then(Value::as_str)
        .map(str::to_string);
    let bounds = serde_json::from_value(
        value
            .get("boundingBox")
            .cloned()
            .ok_or(Error::MissingField("boundingBox"))?,
    )?;
    let payload = value.get("payload").cloned().unwrap_or(Value::Null);
    let kind = kind_from(page_type, payload)?;
    Ok(Annotation {
        id,
        page_number,
        thumbnail,
        bounds,
        kind,
    })
}

/// Parse an annotation from a JSON string.
pub fn from_wire_str(data: &str) -> Result<Annotation, Error> {
    from_wire(&serde_json::from_str(data)?)
}

fn str_field<'a>(value: &'a Value, field: &'static str) -> Result<&'a str, Error> {
    value
        .get(field)
        .and_then(Value::as_str)
        .ok_or(Error::MissingField(field))
}

fn kind_payload(kind: &AnnotationKind) -> Result<Value, Error> {
    Ok(match kind {
        AnnotationKind::Freehand(inner) => serde_json::to_value(inner)?,
        AnnotationKind::Rectangle(inner)
        | AnnotationKind::DrawArea(inner)
        | AnnotationKind::RectSelection(inner) => serde_json::to_value(inner)?,
        AnnotationKind::TextArea(inner) => serde_json::to_value(inner)?,
        AnnotationKind::Image(inner) => serde_json::to_value(inner)?,
        AnnotationKind::Line(inner) => serde_json::to_value(inner)?,
        AnnotationKind::ExtensionLine(inner) => serde_json::to_value(inner)?,
        AnnotationKind::TextUnderline(inner) | AnnotationKind::TextCrossedOut(inner) => {
            serde_json::to_value(inner)?
        }
        AnnotationKind::TextHighlight(inner) => serde_json::to_value(inner)?,
        AnnotationKind::PinSelection(inner) => serde_json::to_value(inner)?,
        AnnotationKind::Misc(misc) => {
            let mut parts = Vec::with_capacity(misc.parts.len());
            for part in &misc.parts {
                parts.push(json!({
                    "pageType": part.page_type(),
                    "payload": kind_payload(part)?,
                }));
            }
            json!({ "parts": parts })
        }
        AnnotationKind::Other { payload, .. } => payload.clone(),
    })
}

fn kind_from(page_type: &str, payload: Value) -> Result<AnnotationKind, Error> {
    Ok(match page_type {
        "freehand" => AnnotationKind::Freehand(serde_json::from_value(payload)?),
        "rectangle" => AnnotationKind::Rectangle(serde_json::from_value(payload)?),
        "drawArea" => AnnotationKind::DrawArea(serde_json::from_value(payload)?),
        "rectSelection" => AnnotationKind::RectSelection(serde_json::from_value(payload)?),
        "textArea" => AnnotationKind::TextArea(serde_json::from_value(payload)?),
        "image" => AnnotationKind::Image(serde_json::from_value(payload)?),
        "line" => AnnotationKind::Line(serde_json::from_value(payload)?),
        "extensionLine" => AnnotationKind::ExtensionLine(serde_json::from_value(payload)?),
        "textUnderline" => AnnotationKind::TextUnderline(serde_json::from_value(payload)?),
        "textCrossedOut" => AnnotationKind::TextCrossedOut(serde_json::from_value(payload)?),
        "textHighlight" => AnnotationKind::TextHighlight(serde_json::from_value(payload)?),
        "pinSelection" => AnnotationKind::PinSelection(serde_json::from_value(payload)?),
        "misc" => {
            let parts_value = payload
                .get("parts")
                .and_then(Value::as_array)
                .ok_or(Error::MissingField("parts"))?;
            let mut parts = Vec::with_capacity(parts_value.len());
            for part in parts_value {
                let part_type = str_field(part, "pageType")?;
                let part_payload = part.get("payload").cloned().unwrap_or(Value::Null);
                parts.push(kind_from(part_type, part_payload)?);
            }
            AnnotationKind::Misc(MiscAnnotation { parts })
        }
        // Written by a newer producer: keep the record intact
        other => AnnotationKind::Other {
            page_type: other.to_string(),
            payload,
        },
    })
}
