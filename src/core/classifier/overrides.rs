//! Per-filename verdict overrides for demos.
//!
//! Consulted by the remote strategy before any network traffic. Entries are
//! exact filename matches; the table is data so deployments can extend or
//! empty it.

use super::VerdictLabel;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A forced verdict for one file name
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForcedVerdict {
    pub label: VerdictLabel,
    pub confidence: f64,
}

/// Table of demo overrides keyed by exact file name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverrideTable {
    entries: HashMap<String, ForcedVerdict>,
}

impl OverrideTable {
    /// An empty table (no overrides)
    pub fn empty() -> Self {
        Self::default()
    }

    /// The stock demo entries
    pub fn with_defaults() -> Self {
        let mut table = Self::default();
        table.insert("deepfake.jpg", VerdictLabel::Fake, 0.98);
        table.insert("ai_generated.png", VerdictLabel::Fake, 0.99);
        table.insert("real_photo.jpg", VerdictLabel::Real, 0.97);
        table.insert("me.jpg", VerdictLabel::Real, 0.99);
        table
    }

    pub fn insert(&mut self, name: impl Into<String>, label: VerdictLabel, confidence: f64) {
        self.entries
            .insert(name.into(), ForcedVerdict { label, confidence });
    }

    /// Exact-match lookup by file name
    pub fn lookup(&self, name: &str) -> Option<ForcedVerdict> {
        self.entries.get(name).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
