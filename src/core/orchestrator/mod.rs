//! # Orchestrator Module
//!
//! Drives one upload-to-verdict session.
//!
//! ## Responsibilities
//! - Accept or reject a candidate image (intake), replacing the previous
//!   selection and its preview
//! - Run exactly one analysis at a time through the configured [`Classifier`]
//! - Map every classified failure to one distinct user-facing message
//! - Reset back to the initial no-file state, cancelling in-flight work
//!
//! Failures never take the session down; after an error it is ready for the
//! next attempt.

mod cancel;

pub use cancel::CancellationToken;

use crate::core::classifier::{Classifier, Verdict};
use crate::core::intake::ImageAsset;
use crate::error::{AnalysisError, AuthenticityError, IntakeError, ProviderError};
use crate::events::{AnalysisEvent, Event, EventSender, IntakeEvent, SessionEvent};
use std::path::Path;

/// One interactive session: a selected image, its verdict, and the
/// user-visible error state.
pub struct AnalysisSession {
    classifier: Box<dyn Classifier>,
    asset: Option<ImageAsset>,
    verdict: Option<Verdict>,
    error: Option<String>,
    analyzing: bool,
    cancel: CancellationToken,
}

impl AnalysisSession {
    pub fn new(classifier: Box<dyn Classifier>) -> Self {
        Self {
            classifier,
            asset: None,
            verdict: None,
            error: None,
            analyzing: false,
            cancel: CancellationToken::new(),
        }
    }

    /// Select an image from disk. Rejection leaves prior state unchanged.
    pub fn select_path(&mut self, path: &Path, events: &EventSender) -> Result<(), IntakeError> {
        let asset = ImageAsset::from_path(path);
        self.install(asset, events)
    }

    /// Select an image from raw bytes with a declared MIME type.
    pub fn select_bytes(
        &mut self,
        name: &str,
        declared_mime: &str,
        bytes: Vec<u8>,
        events: &EventSender,
    ) -> Result<(), IntakeError> {
        let asset = ImageAsset::from_bytes(name, declared_mime, bytes);
        self.install(asset, events)
    }

    fn install(
        &mut self,
        asset: Result<ImageAsset, IntakeError>,
        events: &EventSender,
    ) -> Result<(), IntakeError> {
        // Validate and decode fully before touching session state, so a
        // rejected candidate cannot disturb the previous selection.
        let mut asset = match asset {
            Ok(asset) => asset,
            Err(e) => {
                events.send(Event::Intake(IntakeEvent::Rejected {
                    name: "candidate".to_string(),
                    reason: e.to_string(),
                }));
                return Err(e);
            }
        };

        let (width, height) = match asset.decode() {
            Ok(dims) => dims,
            Err(e) => {
                events.send(Event::Intake(IntakeEvent::Rejected {
                    name: asset.name().to_string(),
                    reason: e.to_string(),
                }));
                return Err(e);
            }
        };

        events.send(Event::Intake(IntakeEvent::Accepted {
            name: asset.name().to_string(),
            byte_size: asset.byte_size(),
        }));
        events.send(Event::Intake(IntakeEvent::Decoded { width, height }));

        // Replacing the asset drops the previous preview with it
        self.asset = Some(asset);
        self.verdict = None;
        self.error = None;
        self.cancel = CancellationToken::new();
        Ok(())
    }

    /// Run the configured classifier on the selected image.
    ///
    /// Only one analysis runs at a time; the outcome (verdict or
    /// user-facing message) is stored on the session either way.
    pub fn analyze(&mut self, events: &EventSender) -> Result<&Verdict, AuthenticityError> {
        if self.analyzing {
            self.error = Some("An analysis is already in progress".to_string());
            return Err(AuthenticityError::Config(
                "analysis already in progress".to_string(),
            ));
        }

        let Some(asset) = self.asset.as_ref() else {
            self.error = Some("Please select an image first".to_string());
            return Err(AnalysisError::Unexpected("no image selected".to_string()).into());
        };

        events.send(Event::Analysis(AnalysisEvent::Started {
            strategy: self.classifier.name().to_string(),
        }));

        self.analyzing = true;
        self.verdict = None;
        self.error = None;

        let token = self.cancel.clone();
        let result = self.classifier.classify(asset, events, &token);
        self.analyzing = false;

        // A cancellation that raced the finish line still invalidates
        // the result; the reset already moved on without it.
        let result = match result {
            Ok(_) if token.is_cancelled() => Err(AnalysisError::Cancelled),
            other => other,
        };

        match result {
            Ok(verdict) => {
                events.send(Event::Analysis(AnalysisEvent::Completed {
                    label: verdict.label.to_string(),
                    confidence: verdict.confidence,
                }));
                Ok(&*self.verdict.insert(verdict))
            }
            Err(AnalysisError::Cancelled) => {
                events.send(Event::Analysis(AnalysisEvent::Cancelled));
                Err(AnalysisError::Cancelled.into())
            }
            Err(e) => {
                let message = user_message(&e);
                events.send(Event::Analysis(AnalysisEvent::Error {
                    message: message.clone(),
                }));
                tracing::warn!(error = %e, "analysis failed");
                self.error = Some(message);
                Err(e.into())
            }
        }
    }

    /// Reset to the initial no-file state. Idempotent.
    ///
    /// Cancels the in-flight token so a stale result cannot land later.
    pub fn reset(&mut self, events: &EventSender) {
        self.cancel.cancel();
        self.asset = None;
        self.verdict = None;
        self.error = None;
        self.analyzing = false;
        self.cancel = CancellationToken::new();
        events.send(Event::Session(SessionEvent::Reset));
    }

    /// A handle that can cancel the current selection's analysis from
    /// another thread.
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn asset(&self) -> Option<&ImageAsset> {
        self.asset.as_ref()
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    /// The last user-facing error message, if any
    pub fn user_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }
}

/// Map a classified failure to its user-facing message.
///
/// One distinct string per failure class; exhausted-provider failures take
/// their flavor from the last candidate's error.
pub fn user_message(error: &AnalysisError) -> String {
    match error {
        AnalysisError::Configuration { .. } => {
            "Configuration update required: the inference route is not proxied. \
             Restart the dev server to apply the connection settings."
                .to_string()
        }
        AnalysisError::Server { status } => {
            format!("External AI service error ({}). Please try again later.", status)
        }
        AnalysisError::AllProvidersUnavailable { last } => match last {
            ProviderError::WarmingUp { .. } => {
                "The AI model is warming up. Please wait 20 seconds and try again.".to_string()
            }
            ProviderError::Retired { .. } => {
                "Classifier not found. Please check the configured provider list.".to_string()
            }
            ProviderError::Timeout { .. } | ProviderError::Network { .. } => {
                "Connection error. Is your internet working?".to_string()
            }
            ProviderError::MalformedResponse { .. } => {
                "All AI models are currently unavailable. Please try again later.".to_string()
            }
        },
        AnalysisError::Cancelled => "Analysis cancelled.".to_string(),
        AnalysisError::Unexpected(reason) => format!("Error: {}", reason),
    }
}
