//! # Core Module
//!
//! The GUI-agnostic authenticity engine.
//!
//! ## Modules
//! - `intake` - accepts and decodes a candidate image
//! - `metadata` - EXIF capture summary
//! - `classifier` - verdict strategies behind one trait
//! - `orchestrator` - session state, cancellation, error mapping
//! - `presenter` - display-ready verdict data

pub mod classifier;
pub mod intake;
pub mod metadata;
pub mod orchestrator;
pub mod presenter;

// Re-export commonly used types
pub use classifier::{Classifier, Verdict, VerdictDetails, VerdictLabel};
pub use intake::{ImageAsset, ImageInsights, MimeKind};
pub use metadata::CaptureMetadata;
pub use orchestrator::{AnalysisSession, CancellationToken};
pub use presenter::{ConfidenceBand, CountUp, Tone, VerdictPresentation};
