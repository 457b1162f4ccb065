use civic_db::issues::models::IssueRecord;
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::draft::IssueDraft;
use crate::scorers::category::CategoryMatchScorer;
use crate::scorers::description::DescriptionSimilarityScorer;
use crate::scorers::location::LocationProximityScorer;
use crate::scorers::title::TitleSimilarityScorer;
use crate::scorers::Scorer;
use crate::trace::SignalResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub issue: IssueRecord,
    /// Weighted sum of all signals, always within [0, 1].
    pub score: f64,
    pub reasons: Vec<String>,
    pub signals: Vec<SignalResult>,
}

fn default_scorers(config: &ScoringConfig) -> Vec<Box<dyn Scorer>> {
    vec![
        Box::new(TitleSimilarityScorer {
            weight: config.weights.title,
            reason_threshold: config.thresholds.title_reason,
            min_chars: config.min_text_chars,
        }),
        Box::new(DescriptionSimilarityScorer {
            weight: config.weights.description,
            reason_threshold: config.thresholds.description_reason,
            min_chars: config.min_text_chars,
        }),
        Box::new(CategoryMatchScorer {
            weight: config.weights.category,
        }),
        Box::new(LocationProximityScorer {
            weight: config.weights.location,
            radius_km: config.dedupe_radius_km,
        }),
    ]
}

/// Score how likely `draft` is a re-report of `existing`.
///
/// Weights sum to 1, so signals that cannot fire (no category, no
/// coordinates) simply contribute 0 and the total is not renormalized.
pub fn score(config: &ScoringConfig, draft: &IssueDraft, existing: &IssueRecord) -> SimilarityResult {
    let signals: Vec<SignalResult> = default_scorers(config)
        .iter()
        .map(|s| s.score(draft, existing))
        .collect();

    let raw_total: f64 = signals.iter().map(|s| s.weighted_score).sum();
    let score = if raw_total.is_finite() {
        raw_total.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let reasons = signals.iter().filter_map(|s| s.reason.clone()).collect();

    SimilarityResult {
        issue: existing.clone(),
        score,
        reasons,
        signals,
    }
}
