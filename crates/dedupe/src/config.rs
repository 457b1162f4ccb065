use civic_common::error::{CivicError, CivicResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub title: f64,
    pub description: f64,
    pub category: f64,
    pub location: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            title: 0.40,
            description: 0.30,
            category: 0.15,
            location: 0.15,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.title + self.description + self.category + self.location
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// Top score at or above this marks the draft as a duplicate.
    pub duplicate: f64,
    /// Results scoring at or below this are dropped from the candidate list.
    pub inclusion_floor: f64,
    /// An own report scoring above this lets the actor vote.
    pub voting_similarity: f64,
    pub title_reason: f64,
    pub description_reason: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            duplicate: 0.70,
            inclusion_floor: 0.30,
            voting_similarity: 0.50,
            title_reason: 0.60,
            description_reason: 0.50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub thresholds: Thresholds,
    pub dedupe_radius_km: f64,
    pub voting_radius_km: f64,
    pub max_similar_issues: usize,
    /// Text fields shorter than this (after trimming) carry no similarity signal.
    pub min_text_chars: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            thresholds: Thresholds::default(),
            dedupe_radius_km: 0.5,
            voting_radius_km: 5.0,
            max_similar_issues: 5,
            min_text_chars: 3,
        }
    }
}

impl ScoringConfig {
    /// Reject configurations that would let a composite score leave [0, 1]
    /// or make the thresholds meaningless.
    pub fn validate(&self) -> CivicResult<()> {
        let weights = [
            ("title", self.weights.title),
            ("description", self.weights.description),
            ("category", self.weights.category),
            ("location", self.weights.location),
        ];
        for (name, w) in weights {
            if !(0.0..=1.0).contains(&w) {
                return Err(CivicError::Validation(format!(
                    "{name} weight must be within [0, 1], got {w}"
                )));
            }
        }
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(CivicError::Validation(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }

        let thresholds = [
            ("duplicate", self.thresholds.duplicate),
            ("inclusion_floor", self.thresholds.inclusion_floor),
            ("voting_similarity", self.thresholds.voting_similarity),
            ("title_reason", self.thresholds.title_reason),
            ("description_reason", self.thresholds.description_reason),
        ];
        for (name, t) in thresholds {
            if !(0.0..=1.0).contains(&t) {
                return Err(CivicError::Validation(format!(
                    "{name} threshold must be within [0, 1], got {t}"
                )));
            }
        }

        for (name, r) in [
            ("dedupe_radius_km", self.dedupe_radius_km),
            ("voting_radius_km", self.voting_radius_km),
        ] {
            if !r.is_finite() || r < 0.0 {
                return Err(CivicError::Validation(format!(
                    "{name} must be a non-negative distance, got {r}"
                )));
            }
        }

        if self.max_similar_issues == 0 {
            return Err(CivicError::Validation(
                "max_similar_issues must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
