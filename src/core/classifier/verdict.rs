//! Verdict types produced by every classifier strategy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two possible outcomes of an analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictLabel {
    Real,
    Fake,
}

impl VerdictLabel {
    pub fn is_fake(&self) -> bool {
        matches!(self, VerdictLabel::Fake)
    }
}

impl std::fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerdictLabel::Real => write!(f, "REAL"),
            VerdictLabel::Fake => write!(f, "FAKE"),
        }
    }
}

/// Auxiliary facts behind a verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictDetails {
    /// One-line analysis text (e.g. "No synthetic patterns detected...")
    pub analysis: String,
    /// Detection method description
    pub method: String,
    /// Identifier of the model/heuristic that decided
    pub model: String,
    /// Score assigned to the FAKE class, 0..=1
    pub fake_score: f64,
    /// Score assigned to the REAL class, 0..=1
    pub real_score: f64,
    /// Pixel width, if the image was decoded
    pub width: Option<u32>,
    /// Pixel height, if the image was decoded
    pub height: Option<u32>,
}

/// The immutable output of one analysis invocation.
///
/// Produced once, then replaced wholesale by the next analysis or reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    pub id: Uuid,
    pub label: VerdictLabel,
    /// Confidence in the label, 0..=1
    pub confidence: f64,
    pub details: VerdictDetails,
    pub analyzed_at: DateTime<Utc>,
}

impl Verdict {
    pub fn new(label: VerdictLabel, confidence: f64, details: VerdictDetails) -> Self {
        Self {
            id: Uuid::new_v4(),
            label,
            confidence,
            details,
            analyzed_at: Utc::now(),
        }
    }

    /// Confidence as an integer percentage
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence * 100.0).round() as u32
    }
}
