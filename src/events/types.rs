//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};

/// All events emitted by the analysis engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Intake phase events
    Intake(IntakeEvent),
    /// Analysis phase events
    Analysis(AnalysisEvent),
    /// Session-level events
    Session(SessionEvent),
}

/// Events while accepting and decoding an image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum IntakeEvent {
    /// A candidate file was accepted
    Accepted { name: String, byte_size: u64 },
    /// The image was decoded and dimensions are known
    Decoded { width: u32, height: u32 },
    /// A candidate file was rejected (non-fatal)
    Rejected { name: String, reason: String },
}

/// Events during an analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AnalysisEvent {
    /// Analysis has started with the named strategy
    Started { strategy: String },
    /// Human-readable progress narration ("Analyzing pixel patterns...")
    StatusChanged { message: String },
    /// A remote candidate is about to be contacted
    ProviderAttempt {
        provider: String,
        index: usize,
        total: usize,
    },
    /// A remote candidate was skipped (chain continues)
    ProviderSkipped { provider: String, reason: String },
    /// Analysis produced a verdict
    Completed { label: String, confidence: f64 },
    /// Analysis observed its cancellation token
    Cancelled,
    /// Analysis failed (mapped to a user-facing message at the boundary)
    Error { message: String },
}

/// Session-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The session was reset to the initial no-file state
    Reset,
}
