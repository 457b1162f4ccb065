pub mod category;
pub mod description;
pub mod location;
pub mod title;

use civic_db::issues::models::IssueRecord;

use crate::draft::IssueDraft;
use crate::text::text_similarity;
use crate::trace::SignalResult;

pub trait Scorer {
    fn name(&self) -> &'static str;
    fn score(&self, draft: &IssueDraft, existing: &IssueRecord) -> SignalResult;
}

/// Jaccard similarity of two text fields, or 0 when either side is too short
/// to tokenize meaningfully.
pub(crate) fn field_similarity(a: &str, b: &str, min_chars: usize) -> f64 {
    if a.trim().chars().count() < min_chars || b.trim().chars().count() < min_chars {
        return 0.0;
    }
    text_similarity(a, b).clamp(0.0, 1.0)
}

pub(crate) fn percent(score: f64) -> i64 {
    (score * 100.0).round() as i64
}
