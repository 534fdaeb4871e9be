//! # Error Module
//!
//! User-friendly error types for the authenticity checker.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - file names, provider ids, what went wrong
//! - **User-friendly messages** - non-technical users should understand
//! - **Keep the cause chain** - exhausted-provider failures carry the last
//!   per-candidate error for diagnostics

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AuthenticityError {
    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while accepting an image
#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Unsupported file type: {declared}. Please upload JPEG, PNG, WebP, GIF, or BMP.")]
    UnsupportedType { declared: String },

    #[error("The file {name} is empty. Please select a valid image.")]
    EmptyFile { name: String },

    #[error("Failed to read {name}: {source}")]
    ReadFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {name}: {reason}")]
    DecodeFailed { name: String, reason: String },
}

/// Errors that terminate an analysis run
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The client is routed to the wrong backend. Retrying another
    /// candidate cannot fix this, so the chain aborts immediately.
    #[error("Classifier routing is misconfigured: {detail}")]
    Configuration { detail: String },

    /// A hard server error from a candidate (anything outside the
    /// recoverable 503/500/410/404 set).
    #[error("Server returned {status}")]
    Server { status: u16 },

    #[error("All classifier candidates are unavailable")]
    AllProvidersUnavailable {
        #[source]
        last: ProviderError,
    },

    #[error("Analysis was cancelled")]
    Cancelled,

    #[error("Unexpected analysis failure: {0}")]
    Unexpected(String),
}

/// Per-candidate failures that the fallback chain recovers from
/// by advancing to the next candidate.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Classifier {provider} is warming up ({status})")]
    WarmingUp { provider: String, status: u16 },

    #[error("Classifier {provider} is retired or missing ({status})")]
    Retired { provider: String, status: u16 },

    #[error("Request to {provider} timed out")]
    Timeout { provider: String },

    #[error("Network failure contacting {provider}: {reason}")]
    Network { provider: String, reason: String },

    #[error("Classifier {provider} returned an unreadable response: {reason}")]
    MalformedResponse { provider: String, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, AuthenticityError>;
