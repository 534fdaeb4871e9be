//! # Presenter Module
//!
//! Turns a [`Verdict`] into display-ready data: semantic tone, confidence
//! band, headline copy, and the count-up animation plan. Rendering itself
//! (colors, timing, widgets) belongs to whichever UI consumes this.

use crate::core::classifier::{Verdict, VerdictLabel};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const COUNT_UP_DURATION: Duration = Duration::from_millis(1000);
const COUNT_UP_STEPS: u32 = 60;

/// Semantic tone of a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    /// REAL: good news rendering
    Favorable,
    /// FAKE: warning rendering
    Unfavorable,
}

impl From<VerdictLabel> for Tone {
    fn from(label: VerdictLabel) -> Self {
        match label {
            VerdictLabel::Real => Tone::Favorable,
            VerdictLabel::Fake => Tone::Unfavorable,
        }
    }
}

/// Cosmetic confidence grouping (thresholds are not detection logic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn from_percent(percent: u32) -> Self {
        if percent >= 80 {
            ConfidenceBand::High
        } else if percent >= 60 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

/// Display-ready facts about one verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerdictPresentation {
    pub label: String,
    pub headline: String,
    pub subline: String,
    pub tone: Tone,
    pub band: ConfidenceBand,
    pub confidence_percent: u32,
}

impl VerdictPresentation {
    pub fn from_verdict(verdict: &Verdict) -> Self {
        let percent = verdict.confidence_percent();
        let (headline, subline) = match verdict.label {
            VerdictLabel::Real => (
                "Authentic Image",
                "This image appears to be a genuine photograph",
            ),
            VerdictLabel::Fake => (
                "Likely AI-Generated",
                "Patterns consistent with synthetic media detected",
            ),
        };

        Self {
            label: verdict.label.to_string(),
            headline: headline.to_string(),
            subline: subline.to_string(),
            tone: verdict.label.into(),
            band: ConfidenceBand::from_percent(percent),
            confidence_percent: percent,
        }
    }
}

/// The 0-to-final count-up animation as data.
///
/// Fixed duration, fixed step count; frames are non-decreasing rounded
/// values ending exactly at the target percentage.
#[derive(Debug, Clone)]
pub struct CountUp {
    frames: Vec<u32>,
    step_interval: Duration,
}

impl CountUp {
    pub fn new(target_percent: u32) -> Self {
        let increment = target_percent as f64 / COUNT_UP_STEPS as f64;
        let mut frames = Vec::new();
        let mut current = 0.0;

        loop {
            current += increment;
            if current >= target_percent as f64 {
                frames.push(target_percent);
                break;
            }
            frames.push(current.round() as u32);
        }

        Self {
            frames,
            step_interval: COUNT_UP_DURATION / COUNT_UP_STEPS,
        }
    }

    pub fn frames(&self) -> &[u32] {
        &self.frames
    }

    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::VerdictDetails;

    fn verdict(label: VerdictLabel, confidence: f64) -> Verdict {
        Verdict::new(
            label,
            confidence,
            VerdictDetails {
                analysis: String::new(),
                method: String::new(),
                model: String::new(),
                fake_score: 0.0,
                real_score: 0.0,
                width: None,
                height: None,
            },
        )
    }

    #[test]
    fn real_is_favorable_fake_is_unfavorable() {
        assert_eq!(Tone::from(VerdictLabel::Real), Tone::Favorable);
        assert_eq!(Tone::from(VerdictLabel::Fake), Tone::Unfavorable);
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(ConfidenceBand::from_percent(97), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_percent(80), ConfidenceBand::High);
        assert_eq!(ConfidenceBand::from_percent(79), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_percent(60), ConfidenceBand::Medium);
        assert_eq!(ConfidenceBand::from_percent(59), ConfidenceBand::Low);
        assert_eq!(ConfidenceBand::from_percent(0), ConfidenceBand::Low);
    }

    #[test]
    fn presentation_copy_follows_the_label() {
        let real = VerdictPresentation::from_verdict(&verdict(VerdictLabel::Real, 0.95));
        assert_eq!(real.headline, "Authentic Image");
        assert_eq!(real.confidence_percent, 95);

        let fake = VerdictPresentation::from_verdict(&verdict(VerdictLabel::Fake, 0.98));
        assert_eq!(fake.headline, "Likely AI-Generated");
        assert_eq!(fake.tone, Tone::Unfavorable);
    }

    #[test]
    fn count_up_ends_exactly_at_target() {
        let plan = CountUp::new(97);
        assert_eq!(*plan.frames().last().unwrap(), 97);
        assert!(plan.frames().len() <= 60);
    }

    #[test]
    fn count_up_frames_never_decrease() {
        let plan = CountUp::new(83);
        for pair in plan.frames().windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn count_up_handles_zero() {
        let plan = CountUp::new(0);
        assert_eq!(plan.frames(), &[0]);
    }
}
