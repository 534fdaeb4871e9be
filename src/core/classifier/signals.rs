//! Strategy: capture-signal heuristic.
//!
//! Scores authenticity from facts the file itself carries: camera EXIF
//! provenance and canvas geometry. Generators emit characteristic sizes
//! (512x512, 1024x1024, ...) and never real camera metadata; cameras emit
//! irregular dimensions and EXIF.

use super::{Classifier, Verdict, VerdictDetails, VerdictLabel};
use crate::core::intake::ImageAsset;
use crate::core::orchestrator::CancellationToken;
use crate::error::AnalysisError;
use crate::events::{AnalysisEvent, Event, EventSender};

/// Canvas sizes typical of diffusion/GAN output
const GENERATOR_DIMENSIONS: [(u32, u32); 10] = [
    (512, 512),
    (768, 768),
    (1024, 1024),
    (512, 768),
    (768, 512),
    (1024, 1792),
    (1792, 1024),
    (1456, 816),
    (816, 1456),
    (2048, 2048),
];

/// Aspect ratios common to cameras and phones
const COMMON_RATIOS: [f64; 7] = [
    1.0,
    16.0 / 9.0,
    9.0 / 16.0,
    4.0 / 3.0,
    3.0 / 4.0,
    2.0,
    0.5,
];

/// The raw facts the scorer consumes
#[derive(Debug, Clone, Copy)]
pub struct SignalInputs {
    pub width: u32,
    pub height: u32,
    pub has_camera_exif: bool,
}

/// Probability in [0, 1] that the image is generated.
pub fn fake_probability(inputs: SignalInputs) -> f64 {
    let SignalInputs {
        width,
        height,
        has_camera_exif,
    } = inputs;

    let mut score: f64 = 0.0;

    if has_camera_exif {
        score -= 0.7;
    }

    if GENERATOR_DIMENSIONS.contains(&(width, height)) {
        score += 0.6;
    }

    let aspect_ratio = if height > 0 {
        width as f64 / height as f64
    } else {
        1.0
    };
    let is_square = (aspect_ratio - 1.0).abs() < 0.01;

    if is_square && width % 64 == 0 && !has_camera_exif {
        score += 0.4;
    }

    let is_irregular = width < 500 || height < 500 || width > 2100 || height > 2100;
    let is_weird_ratio = !COMMON_RATIOS
        .iter()
        .any(|r| (aspect_ratio - r).abs() < 0.1);

    if is_irregular || is_weird_ratio {
        score -= 0.4;
    }

    (score + 0.3).clamp(0.0, 1.0)
}

/// Classifier over capture signals
pub struct ContentSignalClassifier;

impl ContentSignalClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ContentSignalClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for ContentSignalClassifier {
    fn name(&self) -> &'static str {
        "signals"
    }

    fn classify(
        &self,
        asset: &ImageAsset,
        events: &EventSender,
        cancel: &CancellationToken,
    ) -> Result<Verdict, AnalysisError> {
        cancel.ensure_active()?;
        events.send(Event::Analysis(AnalysisEvent::StatusChanged {
            message: "Reading capture signals...".to_string(),
        }));

        let (width, height) = asset.dimensions().ok_or_else(|| {
            AnalysisError::Unexpected("image was not decoded before analysis".to_string())
        })?;

        let has_camera_exif = asset.capture().has_camera_exif();
        let probability = fake_probability(SignalInputs {
            width,
            height,
            has_camera_exif,
        });

        let label = if probability > 0.5 {
            VerdictLabel::Fake
        } else {
            VerdictLabel::Real
        };
        let confidence = if label.is_fake() {
            probability
        } else {
            1.0 - probability
        };

        let analysis = match (has_camera_exif, label) {
            (true, _) => format!(
                "Camera metadata present ({}); dimensions are not generator-typical",
                asset
                    .capture()
                    .camera_display()
                    .unwrap_or_else(|| "unnamed camera".to_string())
            ),
            (false, VerdictLabel::Fake) => {
                format!("{}x{} is a generator-typical canvas with no camera metadata", width, height)
            }
            (false, VerdictLabel::Real) => {
                format!("{}x{} does not match known generator canvases", width, height)
            }
        };

        Ok(Verdict::new(
            label,
            confidence,
            VerdictDetails {
                analysis,
                method: "Capture Signal Heuristic".to_string(),
                model: "capture-signals-v1".to_string(),
                fake_score: probability,
                real_score: 1.0 - probability,
                width: Some(width),
                height: Some(height),
            },
        ))
    }
}
