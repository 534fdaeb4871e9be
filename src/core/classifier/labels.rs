//! Data-driven mapping from provider label vocabularies to verdict classes.
//!
//! Hosted detectors disagree on label spelling ("artificial", "AI-generated",
//! "human", ...). The lexicon matches each returned label against a vocabulary
//! per class by case-insensitive substring, instead of hard-coding any one
//! provider's strings.

use super::VerdictLabel;
use serde::{Deserialize, Serialize};

/// One `{label, score}` pair as returned by a remote classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// A resolved classification from a provider response
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedScores {
    pub label: VerdictLabel,
    pub confidence: f64,
    pub fake_score: f64,
    pub real_score: f64,
}

/// Vocabulary table mapping label spellings to canonical classes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelLexicon {
    fake_terms: Vec<String>,
    real_terms: Vec<String>,
}

impl Default for LabelLexicon {
    fn default() -> Self {
        Self {
            fake_terms: ["FAKE", "ARTIFICIAL", "GENERATED", "AI", "SYNTHETIC"]
                .into_iter()
                .map(String::from)
                .collect(),
            real_terms: ["REAL", "HUMAN", "AUTHENTIC", "NATURAL"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl LabelLexicon {
    fn terms(&self, class: VerdictLabel) -> &[String] {
        match class {
            VerdictLabel::Fake => &self.fake_terms,
            VerdictLabel::Real => &self.real_terms,
        }
    }

    fn matches(&self, class: VerdictLabel, label: &str) -> bool {
        let upper = label.to_uppercase();
        self.terms(class).iter().any(|term| upper.contains(term))
    }

    /// Score of the first returned label matching the class vocabulary
    pub fn class_score(&self, class: VerdictLabel, scores: &[LabelScore]) -> Option<f64> {
        scores
            .iter()
            .find(|entry| self.matches(class, &entry.label))
            .map(|entry| entry.score)
    }

    /// Decide a label from a provider's score list.
    ///
    /// When neither vocabulary matches any label, falls back to the
    /// top-ranked entry as-is. Ties between the classes favor REAL.
    /// Returns `None` for an empty score list.
    pub fn resolve(&self, scores: &[LabelScore]) -> Option<ResolvedScores> {
        let top = scores.first()?;

        let fake = self.class_score(VerdictLabel::Fake, scores);
        let real = self.class_score(VerdictLabel::Real, scores);

        if fake.is_none() && real.is_none() {
            // Unknown vocabulary: trust the top-ranked entry
            let label = if self.matches(VerdictLabel::Fake, &top.label) {
                VerdictLabel::Fake
            } else {
                VerdictLabel::Real
            };
            return Some(ResolvedScores {
                label,
                confidence: top.score,
                fake_score: 0.0,
                real_score: 0.0,
            });
        }

        let fake_score = fake.unwrap_or(0.0);
        let real_score = real.unwrap_or(0.0);
        let label = if fake_score > real_score {
            VerdictLabel::Fake
        } else {
            VerdictLabel::Real
        };
        let confidence = if label.is_fake() { fake_score } else { real_score };

        Some(ResolvedScores {
            label,
            confidence,
            fake_score,
            real_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(label: &str, score: f64) -> LabelScore {
        LabelScore {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn matches_vocabulary_case_insensitively() {
        let lexicon = LabelLexicon::default();
        let scores = vec![score("artificial", 0.91), score("human", 0.09)];

        let resolved = lexicon.resolve(&scores).unwrap();
        assert_eq!(resolved.label, VerdictLabel::Fake);
        assert!((resolved.confidence - 0.91).abs() < f64::EPSILON);
        assert!((resolved.real_score - 0.09).abs() < f64::EPSILON);
    }

    #[test]
    fn substring_match_handles_provider_spellings() {
        let lexicon = LabelLexicon::default();
        let scores = vec![
            score("AI-generated image", 0.2),
            score("authentic photograph", 0.8),
        ];

        let resolved = lexicon.resolve(&scores).unwrap();
        assert_eq!(resolved.label, VerdictLabel::Real);
        assert!((resolved.fake_score - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn tie_favors_real() {
        let lexicon = LabelLexicon::default();
        let scores = vec![score("fake", 0.5), score("real", 0.5)];

        let resolved = lexicon.resolve(&scores).unwrap();
        assert_eq!(resolved.label, VerdictLabel::Real);
    }

    #[test]
    fn unknown_vocabulary_falls_back_to_top_entry() {
        let lexicon = LabelLexicon::default();
        let scores = vec![score("category_7", 0.77), score("category_2", 0.23)];

        let resolved = lexicon.resolve(&scores).unwrap();
        assert_eq!(resolved.label, VerdictLabel::Real);
        assert!((resolved.confidence - 0.77).abs() < f64::EPSILON);
        assert_eq!(resolved.fake_score, 0.0);
        assert_eq!(resolved.real_score, 0.0);
    }

    #[test]
    fn empty_scores_resolve_to_none() {
        let lexicon = LabelLexicon::default();
        assert!(lexicon.resolve(&[]).is_none());
    }
}
