//! # Classifier Module
//!
//! The strategies that turn one accepted image into a [`Verdict`].
//!
//! ## Strategies
//! - `filename` - deterministic local heuristic on the display name
//! - `remote` - sequential fallback chain across hosted classifiers
//! - `signals` - capture-signal heuristic (EXIF provenance + canvas shape)
//!
//! All strategies sit behind the [`Classifier`] trait so the orchestrator
//! can wire in any of them without caring which.

mod filename;
mod labels;
mod overrides;
mod remote;
mod signals;
mod verdict;

pub use filename::FilenameHeuristic;
pub use labels::{LabelLexicon, LabelScore};
pub use overrides::{ForcedVerdict, OverrideTable};
pub use remote::{
    AnalysisAttempt, AttemptOutcome, HttpTransport, ProviderResponse, ProviderTransport,
    RemoteConfig, RemoteFallbackClassifier, TransportFailure,
};
pub use signals::ContentSignalClassifier;
pub use verdict::{Verdict, VerdictDetails, VerdictLabel};

use crate::core::orchestrator::CancellationToken;
use crate::core::intake::ImageAsset;
use crate::error::AnalysisError;
use crate::events::EventSender;

/// A strategy that classifies one accepted image.
///
/// Implementations report narration through `events` and observe `cancel`
/// at every suspension point (delays, between network attempts).
pub trait Classifier: Send + Sync {
    /// Short name for logs and events (e.g. "filename", "remote")
    fn name(&self) -> &'static str;

    /// Produce a verdict for the asset, or a classified failure.
    fn classify(
        &self,
        asset: &ImageAsset,
        events: &EventSender,
        cancel: &CancellationToken,
    ) -> Result<Verdict, AnalysisError>;
}
