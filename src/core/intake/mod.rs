//! # Intake Module
//!
//! Accepts a candidate image for one analysis session.
//!
//! ## Supported Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//! - WebP (.webp)
//! - GIF (.gif)
//! - BMP (.bmp)
//!
//! Anything outside this set is rejected with a non-fatal, user-visible
//! error before analysis can start.
//!
//! ## Lifecycle
//! An [`ImageAsset`] owns the raw bytes, the base64 preview, and the EXIF
//! capture summary for the duration of one selection. Pixel dimensions are
//! unknown until [`ImageAsset::decode`] runs. Replacing or dropping the
//! asset releases the preview with it.

mod insights;

pub use insights::ImageInsights;

use crate::core::metadata::{extract_capture_metadata, CaptureMetadata};
use crate::error::IntakeError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Declared image type of an accepted file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MimeKind {
    Jpeg,
    Png,
    WebP,
    Gif,
    Bmp,
}

impl MimeKind {
    /// Map a file extension to a supported kind
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(MimeKind::Jpeg),
            "png" => Some(MimeKind::Png),
            "webp" => Some(MimeKind::WebP),
            "gif" => Some(MimeKind::Gif),
            "bmp" => Some(MimeKind::Bmp),
            _ => None,
        }
    }

    /// Map a declared MIME type to a supported kind
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.to_lowercase().as_str() {
            "image/jpeg" => Some(MimeKind::Jpeg),
            "image/png" => Some(MimeKind::Png),
            "image/webp" => Some(MimeKind::WebP),
            "image/gif" => Some(MimeKind::Gif),
            "image/bmp" => Some(MimeKind::Bmp),
            _ => None,
        }
    }

    /// The full MIME type string
    pub fn mime_type(&self) -> &'static str {
        match self {
            MimeKind::Jpeg => "image/jpeg",
            MimeKind::Png => "image/png",
            MimeKind::WebP => "image/webp",
            MimeKind::Gif => "image/gif",
            MimeKind::Bmp => "image/bmp",
        }
    }

    /// Uppercase display name derived from the MIME subtype
    pub fn format_display(&self) -> &'static str {
        match self {
            MimeKind::Jpeg => "JPEG",
            MimeKind::Png => "PNG",
            MimeKind::WebP => "WEBP",
            MimeKind::Gif => "GIF",
            MimeKind::Bmp => "BMP",
        }
    }
}

/// One accepted image, owned for the duration of a selection
#[derive(Debug, Clone)]
pub struct ImageAsset {
    name: String,
    mime: MimeKind,
    bytes: Vec<u8>,
    dimensions: Option<(u32, u32)>,
    preview: String,
    capture: CaptureMetadata,
}

impl ImageAsset {
    /// Accept raw bytes with a declared MIME type.
    ///
    /// Rejects unsupported types and empty payloads. Dimensions remain
    /// unknown until [`decode`](Self::decode) runs.
    pub fn from_bytes(
        name: impl Into<String>,
        declared_mime: &str,
        bytes: Vec<u8>,
    ) -> Result<Self, IntakeError> {
        let name = name.into();

        let mime = MimeKind::from_mime(declared_mime).ok_or_else(|| {
            IntakeError::UnsupportedType {
                declared: declared_mime.to_string(),
            }
        })?;

        if bytes.is_empty() {
            return Err(IntakeError::EmptyFile { name });
        }

        let preview = format!("data:{};base64,{}", mime.mime_type(), BASE64.encode(&bytes));
        let capture = extract_capture_metadata(&bytes);

        Ok(Self {
            name,
            mime,
            bytes,
            dimensions: None,
            preview,
            capture,
        })
    }

    /// Accept a file from disk, inferring the type from its extension.
    pub fn from_path(path: &Path) -> Result<Self, IntakeError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        let mime = MimeKind::from_extension(ext).ok_or_else(|| IntakeError::UnsupportedType {
            declared: if ext.is_empty() {
                "unknown".to_string()
            } else {
                format!(".{}", ext)
            },
        })?;

        let bytes = std::fs::read(path).map_err(|source| IntakeError::ReadFailed {
            name: name.clone(),
            source,
        })?;

        Self::from_bytes(name, mime.mime_type(), bytes)
    }

    /// Decode the image to learn its pixel dimensions.
    ///
    /// Idempotent; a second call is a no-op.
    pub fn decode(&mut self) -> Result<(u32, u32), IntakeError> {
        if let Some(dims) = self.dimensions {
            return Ok(dims);
        }

        let decoded =
            image::load_from_memory(&self.bytes).map_err(|e| IntakeError::DecodeFailed {
                name: self.name.clone(),
                reason: e.to_string(),
            })?;

        let dims = (decoded.width(), decoded.height());
        self.dimensions = Some(dims);
        Ok(dims)
    }

    /// Display name of the file
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared image kind
    pub fn mime(&self) -> MimeKind {
        self.mime
    }

    /// Raw image bytes (sent to remote classifiers as-is)
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the payload in bytes
    pub fn byte_size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Pixel dimensions, known only after [`decode`](Self::decode)
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    /// The displayable data-URL preview, owned by this asset
    pub fn preview_data_url(&self) -> &str {
        &self.preview
    }

    /// EXIF capture summary (camera, software, date)
    pub fn capture(&self) -> &CaptureMetadata {
        &self.capture
    }

    /// Derive the display metadata block for this asset
    pub fn insights(&self) -> ImageInsights {
        ImageInsights::derive(&self.name, self.mime, self.byte_size(), self.dimensions)
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    /// A minimal valid 1x1 PNG, used across the crate's tests.
    pub const TINY_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG header
        0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1
        0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44,
        0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8, 0xFF, 0xFF, 0x3F, 0x00, 0x05, 0xFE, 0x02, 0xFE, 0xDC,
        0xCC, 0x59, 0xE7, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];
}

#[cfg(test)]
mod tests {
    use super::test_fixtures::TINY_PNG;
    use super::*;

    #[test]
    fn accepts_every_whitelisted_mime() {
        for mime in [
            "image/jpeg",
            "image/png",
            "image/webp",
            "image/gif",
            "image/bmp",
        ] {
            assert!(
                ImageAsset::from_bytes("photo.bin", mime, vec![1, 2, 3]).is_ok(),
                "{} should be accepted",
                mime
            );
        }
    }

    #[test]
    fn rejects_unsupported_mime() {
        let result = ImageAsset::from_bytes("document.pdf", "application/pdf", vec![1]);
        match result {
            Err(IntakeError::UnsupportedType { declared }) => {
                assert_eq!(declared, "application/pdf");
            }
            other => panic!("expected UnsupportedType, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn rejects_empty_payload() {
        let result = ImageAsset::from_bytes("blank.png", "image/png", Vec::new());
        assert!(matches!(result, Err(IntakeError::EmptyFile { .. })));
    }

    #[test]
    fn extension_mapping_is_case_insensitive() {
        assert_eq!(MimeKind::from_extension("JPG"), Some(MimeKind::Jpeg));
        assert_eq!(MimeKind::from_extension("Png"), Some(MimeKind::Png));
        assert_eq!(MimeKind::from_extension("heic"), None);
    }

    #[test]
    fn decode_populates_dimensions_once() {
        let mut asset =
            ImageAsset::from_bytes("pixel.png", "image/png", TINY_PNG.to_vec()).unwrap();
        assert_eq!(asset.dimensions(), None);

        let dims = asset.decode().unwrap();
        assert_eq!(dims, (1, 1));
        assert_eq!(asset.dimensions(), Some((1, 1)));

        // Second decode is a no-op
        assert_eq!(asset.decode().unwrap(), (1, 1));
    }

    #[test]
    fn decode_failure_reports_name() {
        let mut asset =
            ImageAsset::from_bytes("garbage.png", "image/png", b"not an image".to_vec()).unwrap();
        match asset.decode() {
            Err(IntakeError::DecodeFailed { name, .. }) => assert_eq!(name, "garbage.png"),
            other => panic!("expected DecodeFailed, got {:?}", other),
        }
    }

    #[test]
    fn preview_is_a_data_url() {
        let asset = ImageAsset::from_bytes("pixel.png", "image/png", TINY_PNG.to_vec()).unwrap();
        assert!(asset.preview_data_url().starts_with("data:image/png;base64,"));
    }

    #[test]
    fn from_path_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let result = ImageAsset::from_path(&path);
        assert!(matches!(
            result,
            Err(IntakeError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn from_path_reads_valid_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        std::fs::write(&path, TINY_PNG).unwrap();

        let mut asset = ImageAsset::from_path(&path).unwrap();
        assert_eq!(asset.name(), "pixel.png");
        assert_eq!(asset.mime(), MimeKind::Png);
        assert_eq!(asset.decode().unwrap(), (1, 1));
    }
}
