//! Derived display metadata for an accepted image.

use super::MimeKind;
use serde::{Deserialize, Serialize};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Display-ready facts about an accepted image.
///
/// Dimension-derived fields stay `None` until the asset has been decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInsights {
    /// Original file name
    pub file_name: String,
    /// Uppercase format name (e.g. "PNG")
    pub format: String,
    /// File size, binary megabytes with 2-decimal rounding (e.g. "2.29 MB")
    pub size_display: String,
    /// Pixel dimensions (e.g. "1200 × 800")
    pub dimensions: Option<String>,
    /// Width over height, 2-decimal (e.g. "1.50")
    pub aspect_ratio: Option<String>,
    /// Megapixel count, 1-decimal (e.g. "1.0 MP")
    pub megapixels: Option<String>,
}

impl ImageInsights {
    /// Derive insights from the asset's raw facts.
    pub fn derive(
        file_name: &str,
        mime: MimeKind,
        byte_size: u64,
        dimensions: Option<(u32, u32)>,
    ) -> Self {
        let size_display = format!("{:.2} MB", byte_size as f64 / BYTES_PER_MB);

        let (dimensions, aspect_ratio, megapixels) = match dimensions {
            Some((w, h)) => (
                Some(format!("{} × {}", w, h)),
                Some(format!("{:.2}", w as f64 / h as f64)),
                Some(format!(
                    "{:.1} MP",
                    (w as f64 * h as f64) / 1_000_000.0
                )),
            ),
            None => (None, None, None),
        };

        Self {
            file_name: file_name.to_string(),
            format: mime.format_display().to_string(),
            size_display,
            dimensions,
            aspect_ratio,
            megapixels,
        }
    }
}
