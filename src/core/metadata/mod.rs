//! # Metadata Module
//!
//! Extracts an EXIF capture summary from image bytes.
//!
//! ## Extracted Fields
//! - Capture date/time (DateTimeOriginal, falling back to DateTime)
//! - Camera make and model
//! - Lens model
//! - Editing software
//!
//! Camera provenance is an authenticity signal: generated images almost
//! never carry real camera EXIF, so its presence pulls the content-signal
//! classifier toward REAL.

use chrono::{DateTime, NaiveDateTime, Utc};
use exif::{In, Reader, Tag, Value};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// EXIF capture summary for one image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureMetadata {
    /// Original capture date/time
    pub date_taken: Option<DateTime<Utc>>,
    /// Camera make (e.g. "Apple", "Canon")
    pub camera_make: Option<String>,
    /// Camera model (e.g. "iPhone 15 Pro")
    pub camera_model: Option<String>,
    /// Lens model, if recorded
    pub lens_model: Option<String>,
    /// Software that last touched the file
    pub software: Option<String>,
}

impl CaptureMetadata {
    /// Whether the image carries any camera provenance
    pub fn has_camera_exif(&self) -> bool {
        self.camera_make.is_some() || self.camera_model.is_some() || self.lens_model.is_some()
    }

    /// Get a display string for the camera
    pub fn camera_display(&self) -> Option<String> {
        match (&self.camera_make, &self.camera_model) {
            (Some(make), Some(model)) => {
                // Avoid duplication like "Apple Apple iPhone"
                if model.starts_with(make) {
                    Some(model.clone())
                } else {
                    Some(format!("{} {}", make, model))
                }
            }
            (None, Some(model)) => Some(model.clone()),
            (Some(make), None) => Some(make.clone()),
            (None, None) => None,
        }
    }
}

/// Extract the EXIF capture summary from raw image bytes.
///
/// Returns an empty summary when no EXIF container is present; absence
/// of metadata is information, not an error.
pub fn extract_capture_metadata(bytes: &[u8]) -> CaptureMetadata {
    let mut metadata = CaptureMetadata::default();

    let mut cursor = Cursor::new(bytes);
    let exif_reader = match Reader::new().read_from_container(&mut cursor) {
        Ok(r) => r,
        Err(_) => return metadata,
    };

    // Capture date: prefer DateTimeOriginal, fall back to DateTime
    for tag in [Tag::DateTimeOriginal, Tag::DateTime] {
        if metadata.date_taken.is_some() {
            break;
        }
        if let Some(field) = exif_reader.get_field(tag, In::PRIMARY) {
            if let Some(s) = get_string_value(&field.value) {
                // EXIF date format: "YYYY:MM:DD HH:MM:SS"
                if let Ok(naive) = NaiveDateTime::parse_from_str(&s, "%Y:%m:%d %H:%M:%S") {
                    metadata.date_taken = Some(DateTime::from_naive_utc_and_offset(naive, Utc));
                }
            }
        }
    }

    if let Some(field) = exif_reader.get_field(Tag::Make, In::PRIMARY) {
        metadata.camera_make = get_string_value(&field.value);
    }

    if let Some(field) = exif_reader.get_field(Tag::Model, In::PRIMARY) {
        metadata.camera_model = get_string_value(&field.value);
    }

    if let Some(field) = exif_reader.get_field(Tag::LensModel, In::PRIMARY) {
        metadata.lens_model = get_string_value(&field.value);
    }

    if let Some(field) = exif_reader.get_field(Tag::Software, In::PRIMARY) {
        metadata.software = get_string_value(&field.value);
    }

    metadata
}

/// Helper to extract string from EXIF ASCII value
fn get_string_value(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        if let Some(bytes) = vec.first() {
            if let Ok(s) = std::str::from_utf8(bytes) {
                let trimmed = s.trim_end_matches('\0').trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}
