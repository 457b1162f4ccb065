use civic_db::issues::models::IssueRecord;

use crate::draft::IssueDraft;
use crate::trace::SignalResult;

use super::Scorer;

pub struct CategoryMatchScorer {
    pub weight: f64,
}

impl Scorer for CategoryMatchScorer {
    fn name(&self) -> &'static str {
        "category_match"
    }

    fn score(&self, draft: &IssueDraft, existing: &IssueRecord) -> SignalResult {
        let same = draft.category_id.is_some() && draft.category_id == existing.category_id;
        let score = if same { 1.0 } else { 0.0 };

        SignalResult {
            signal: self.name().to_string(),
            score,
            weight: self.weight,
            weighted_score: score * self.weight,
            reason: same.then(|| "Same category".to_string()),
            detail: format!(
                "draft_category={:?} issue_category={:?}",
                draft.category_id, existing.category_id
            ),
        }
    }
}
