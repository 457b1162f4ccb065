use civic_db::issues::models::{IssueFilter, IssueRecord};
use civic_db::issues::repositories::IssueRepository;
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::draft::IssueDraft;
use crate::engine::{score, SimilarityResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicationCheckResult {
    pub is_duplicate: bool,
    /// Best matches first, capped at `max_similar_issues`.
    pub similar_issues: Vec<SimilarityResult>,
    pub threshold: f64,
}

impl DuplicationCheckResult {
    fn empty(threshold: f64) -> Self {
        Self {
            is_duplicate: false,
            similar_issues: Vec::new(),
            threshold,
        }
    }
}

/// How the checker asks the repository for candidates.
#[derive(Debug, Clone)]
pub struct RetrievalOptions {
    /// Only fetch issues in the draft's category when it has one.
    ///
    /// Off by default: an identical report filed under another category can
    /// still score above the duplicate threshold. Only safe to enable when
    /// the category weight is at least `1 - duplicate threshold`.
    pub prefilter_by_category: bool,
    pub candidate_limit: Option<i64>,
}

impl Default for RetrievalOptions {
    fn default() -> Self {
        Self {
            prefilter_by_category: false,
            candidate_limit: None,
        }
    }
}

/// Score every candidate, keep those above the inclusion floor, and rank
/// them best first. Candidates with equal scores keep their input order.
pub fn rank_candidates(
    config: &ScoringConfig,
    draft: &IssueDraft,
    candidates: &[IssueRecord],
) -> DuplicationCheckResult {
    let mut similar: Vec<SimilarityResult> = candidates
        .iter()
        .map(|existing| score(config, draft, existing))
        .filter(|r| r.score > config.thresholds.inclusion_floor)
        .collect();

    // `sort_by` is stable, which is what keeps ties in retrieval order.
    similar.sort_by(|a, b| b.score.total_cmp(&a.score));
    similar.truncate(config.max_similar_issues);

    let is_duplicate = similar
        .first()
        .is_some_and(|top| top.score >= config.thresholds.duplicate);

    DuplicationCheckResult {
        is_duplicate,
        similar_issues: similar,
        threshold: config.thresholds.duplicate,
    }
}

pub struct DuplicateChecker<R: IssueRepository> {
    repo: R,
    config: ScoringConfig,
    retrieval: RetrievalOptions,
}

impl<R: IssueRepository> DuplicateChecker<R> {
    pub fn new(repo: R, config: ScoringConfig) -> Self {
        Self {
            repo,
            config,
            retrieval: RetrievalOptions::default(),
        }
    }

    pub fn with_retrieval(mut self, retrieval: RetrievalOptions) -> Self {
        self.retrieval = retrieval;
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Check a drafted report against the existing corpus.
    ///
    /// Duplicate detection is advisory: when the corpus cannot be fetched the
    /// check reports no duplicates rather than failing the submission.
    pub async fn check_for_duplicates(&self, draft: &IssueDraft) -> DuplicationCheckResult {
        let filter = IssueFilter {
            category_id: if self.retrieval.prefilter_by_category {
                draft.category_id
            } else {
                None
            },
            limit: self.retrieval.candidate_limit,
        };

        let candidates = match self.repo.get_all(filter).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!(error = %e, "duplicate check skipped: corpus retrieval failed");
                return DuplicationCheckResult::empty(self.config.thresholds.duplicate);
            }
        };

        let result = rank_candidates(&self.config, draft, &candidates);
        tracing::debug!(
            candidates = candidates.len(),
            similar = result.similar_issues.len(),
            is_duplicate = result.is_duplicate,
            top_score = result.similar_issues.first().map(|r| r.score),
            "duplicate check complete"
        );
        result
    }
}
