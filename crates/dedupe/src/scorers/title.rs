use civic_db::issues::models::IssueRecord;

use crate::draft::IssueDraft;
use crate::trace::SignalResult;

use super::{field_similarity, percent, Scorer};

pub struct TitleSimilarityScorer {
    pub weight: f64,
    pub reason_threshold: f64,
    pub min_chars: usize,
}

impl Scorer for TitleSimilarityScorer {
    fn name(&self) -> &'static str {
        "title_similarity"
    }

    fn score(&self, draft: &IssueDraft, existing: &IssueRecord) -> SignalResult {
        let score = field_similarity(&draft.title, &existing.title, self.min_chars);

        let reason = (score > self.reason_threshold)
            .then(|| format!("Similar title ({}%)", percent(score)));

        SignalResult {
            signal: self.name().to_string(),
            score,
            weight: self.weight,
            weighted_score: score * self.weight,
            reason,
            detail: format!(
                "draft_title={:?} issue_title={:?}",
                draft.title, existing.title
            ),
        }
    }
}
