use civic_db::issues::models::IssueRecord;

use crate::draft::IssueDraft;
use crate::trace::SignalResult;

use super::{field_similarity, percent, Scorer};

pub struct DescriptionSimilarityScorer {
    pub weight: f64,
    pub reason_threshold: f64,
    pub min_chars: usize,
}

impl Scorer for DescriptionSimilarityScorer {
    fn name(&self) -> &'static str {
        "description_similarity"
    }

    fn score(&self, draft: &IssueDraft, existing: &IssueRecord) -> SignalResult {
        let score = field_similarity(&draft.description, &existing.description, self.min_chars);

        let reason = (score > self.reason_threshold)
            .then(|| format!("Similar description ({}%)", percent(score)));

        SignalResult {
            signal: self.name().to_string(),
            score,
            weight: self.weight,
            weighted_score: score * self.weight,
            reason,
            detail: format!(
                "draft_chars={} issue_chars={}",
                draft.description.chars().count(),
                existing.description.chars().count()
            ),
        }
    }
}
