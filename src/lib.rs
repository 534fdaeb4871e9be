//! # Photo Authenticity Checker
//!
//! An AI-generated image detector that explains its verdicts.
//!
//! ## Core Philosophy
//! - **One verdict, clearly labelled** - REAL or FAKE with a confidence score
//! - **Show WHY** - every verdict carries its analysis text and per-class scores
//! - **Degrade gracefully** - remote classifiers may be cold-started or
//!   retired; the fallback chain treats that as expected weather
//!
//! ## Architecture
//! The library is split into a core engine (GUI-agnostic) and presentation layers:
//! - `core` - intake, classifier strategies, orchestration, presentation data
//! - `events` - event-driven progress reporting (GUI-ready)
//! - `error` - user-friendly error types
//! - `cli` - command-line interface

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{AuthenticityError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
