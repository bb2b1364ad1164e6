//! Error taxonomy for the annotation engine
//!
//! Invalid viewport parameters are programming errors on the caller's side
//! and fail fast; render-path degradations (missing font, capture failure)
//! are handled locally and never surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Page rotation is constrained to quarter turns.
    #[error("rotation must be one of 0, 90, 180 or 270 degrees, got {0}")]
    InvalidRotation(u16),

    /// Zoom factor must be a positive finite number.
    #[error("scale must be positive and finite, got {0}")]
    InvalidScale(f64),

    /// Canvas pixel dimensions must be positive and finite.
    #[error("canvas dimensions must be positive, got {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },

    /// A persisted annotation record failed to parse.
    #[error("malformed annotation record: {0}")]
    Wire(#[from] serde_json::Error),

    /// A persisted annotation record is missing a required envelope field.
    #[error("annotation record is missing field `{0}`")]
    MissingField(&'static str),

    /// A font blob could not be parsed.
    #[error("unusable font data")]
    BadFont,
}
