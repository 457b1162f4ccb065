use civic_db::issues::models::{GeoPoint, IssueRecord};
use civic_db::issues::repositories::IssueRepository;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ScoringConfig;
use crate::draft::IssueDraft;
use crate::engine::score;
use crate::geo::{distance_between, format_kilometers_beyond, format_meters};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingDecision {
    pub can_vote: bool,
    pub reason: String,
    /// Name of the rule that produced the decision.
    pub rule: String,
}

impl VotingDecision {
    pub fn allow(rule: &str, reason: impl Into<String>) -> Self {
        Self {
            can_vote: true,
            reason: reason.into(),
            rule: rule.to_string(),
        }
    }

    pub fn deny(rule: &str, reason: impl Into<String>) -> Self {
        Self {
            can_vote: false,
            reason: reason.into(),
            rule: rule.to_string(),
        }
    }
}

/// Everything a rule may look at when deciding.
pub struct VoteContext<'a> {
    pub config: &'a ScoringConfig,
    pub actor_id: Uuid,
    pub issue: &'a IssueRecord,
    pub own_issues: &'a [IssueRecord],
    pub actor_location: Option<GeoPoint>,
}

pub trait VotingRule: Send + Sync {
    fn name(&self) -> &'static str;
    /// `None` passes the decision on to the next rule.
    fn evaluate(&self, ctx: &VoteContext<'_>) -> Option<VotingDecision>;
}

pub struct SelfAuthoredRule;

impl VotingRule for SelfAuthoredRule {
    fn name(&self) -> &'static str {
        "self_authored"
    }

    fn evaluate(&self, ctx: &VoteContext<'_>) -> Option<VotingDecision> {
        (ctx.issue.author_id == ctx.actor_id)
            .then(|| VotingDecision::allow(self.name(), "self-authored"))
    }
}

pub struct SimilarOwnReportRule;

impl VotingRule for SimilarOwnReportRule {
    fn name(&self) -> &'static str {
        "similar_own_report"
    }

    fn evaluate(&self, ctx: &VoteContext<'_>) -> Option<VotingDecision> {
        let threshold = ctx.config.thresholds.voting_similarity;
        ctx.own_issues
            .iter()
            .any(|own| score(ctx.config, &IssueDraft::from(own), ctx.issue).score > threshold)
            .then(|| VotingDecision::allow(self.name(), "similar to own report"))
    }
}

/// Decides on distance whenever both locations are known; stays silent
/// otherwise so the ladder falls through to the final denial.
pub struct ProximityRule;

impl VotingRule for ProximityRule {
    fn name(&self) -> &'static str {
        "proximity"
    }

    fn evaluate(&self, ctx: &VoteContext<'_>) -> Option<VotingDecision> {
        let actor = ctx.actor_location?;
        let issue = ctx.issue.coordinates()?;
        let distance_km = distance_between(actor, issue);

        let decision = if distance_km <= ctx.config.voting_radius_km {
            VotingDecision::allow(
                self.name(),
                format!("issue is in your area (~{} away)", format_meters(distance_km)),
            )
        } else {
            VotingDecision::deny(
                self.name(),
                format!(
                    "issue is too far from your location (~{} away)",
                    format_kilometers_beyond(distance_km, ctx.config.voting_radius_km)
                ),
            )
        };
        Some(decision)
    }
}

const LOCATION_UNAVAILABLE_RULE: &str = "location_unavailable";

pub fn default_rules() -> Vec<Box<dyn VotingRule>> {
    vec![
        Box::new(SelfAuthoredRule),
        Box::new(SimilarOwnReportRule),
        Box::new(ProximityRule),
    ]
}

/// Run `rules` in order and return the first decision. With no match the
/// vote is denied.
pub fn evaluate_rules(rules: &[Box<dyn VotingRule>], ctx: &VoteContext<'_>) -> VotingDecision {
    rules
        .iter()
        .find_map(|rule| rule.evaluate(ctx))
        .unwrap_or_else(|| VotingDecision::deny(LOCATION_UNAVAILABLE_RULE, "location unavailable"))
}

/// Decide whether `actor_id` may vote on `issue` using the default ladder.
pub fn evaluate_vote(
    config: &ScoringConfig,
    actor_id: Uuid,
    issue: &IssueRecord,
    own_issues: &[IssueRecord],
    actor_location: Option<GeoPoint>,
) -> VotingDecision {
    let ctx = VoteContext {
        config,
        actor_id,
        issue,
        own_issues,
        actor_location,
    };
    evaluate_rules(&default_rules(), &ctx)
}

/// Help text describing the voting rules, in evaluation order. The radius
/// comes from `config` so the text follows any override.
pub fn voting_rules_explanation(config: &ScoringConfig) -> Vec<String> {
    vec![
        "You can always vote on issues you reported yourself.".to_string(),
        "You can vote on issues that are similar to one you have reported.".to_string(),
        format!(
            "Otherwise, you can vote on issues within {} km of your current location.",
            config.voting_radius_km
        ),
        "If your location or the issue's location is unknown, voting is not available."
            .to_string(),
    ]
}

pub struct VotingEvaluator<R: IssueRepository> {
    repo: R,
    config: ScoringConfig,
    rules: Vec<Box<dyn VotingRule>>,
}

impl<R: IssueRepository> VotingEvaluator<R> {
    pub fn new(repo: R, config: ScoringConfig) -> Self {
        Self {
            repo,
            config,
            rules: default_rules(),
        }
    }

    /// Put `rule` ahead of every existing rule.
    pub fn prepend_rule(mut self, rule: Box<dyn VotingRule>) -> Self {
        self.rules.insert(0, rule);
        self
    }

    pub fn rules_explanation(&self) -> Vec<String> {
        voting_rules_explanation(&self.config)
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Decide whether `actor_id` may vote on `issue`.
    ///
    /// If the actor's own reports cannot be fetched they are treated as empty,
    /// so the decision falls back to authorship and location.
    pub async fn can_vote(
        &self,
        actor_id: Uuid,
        issue: &IssueRecord,
        actor_location: Option<GeoPoint>,
    ) -> VotingDecision {
        let own_issues = match self.repo.get_by_author(actor_id).await {
            Ok(own) => own,
            Err(e) => {
                tracing::warn!(error = %e, %actor_id, "own issues unavailable, continuing without them");
                Vec::new()
            }
        };

        let ctx = VoteContext {
            config: &self.config,
            actor_id,
            issue,
            own_issues: &own_issues,
            actor_location,
        };
        let decision = evaluate_rules(&self.rules, &ctx);
        tracing::debug!(
            %actor_id,
            issue_id = %issue.id,
            can_vote = decision.can_vote,
            rule = %decision.rule,
            "voting eligibility decided"
        );
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use civic_common::error::{CivicError, CivicResult};
    use civic_db::issues::memory_repository::InMemoryIssueRepository;
    use civic_db::issues::models::IssueFilter;

    const TITLE: &str = "Pothole on Main Street near Oak Ave";
    const DESCRIPTION: &str = "Deep pothole in the right lane, cars swerving to avoid it daily";
    const ISSUE_AT: (f64, f64) = (52.5200, 13.4050);

    fn make_issue(
        title: &str,
        description: &str,
        author_id: Uuid,
        location: Option<(f64, f64)>,
    ) -> IssueRecord {
        IssueRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.to_string(),
            category_id: None,
            latitude: location.map(|l| l.0),
            longitude: location.map(|l| l.1),
            author_id,
            created_at: Utc::now(),
        }
    }

    struct FailingRepo;

    #[async_trait]
    impl IssueRepository for FailingRepo {
        async fn get_all(&self, _filter: IssueFilter) -> CivicResult<Vec<IssueRecord>> {
            Err(CivicError::Database("timeout".to_string()))
        }

        async fn get_by_author(&self, _author_id: Uuid) -> CivicResult<Vec<IssueRecord>> {
            Err(CivicError::Database("timeout".to_string()))
        }
    }

    struct OverrideRule {
        actor_id: Uuid,
    }

    impl VotingRule for OverrideRule {
        fn name(&self) -> &'static str {
            "department_override"
        }

        fn evaluate(&self, ctx: &VoteContext<'_>) -> Option<VotingDecision> {
            (ctx.actor_id == self.actor_id)
                .then(|| VotingDecision::allow(self.name(), "department override"))
        }
    }

    #[test]
    fn author_can_vote_without_location() {
        let cfg = ScoringConfig::default();
        let actor = Uuid::new_v4();
        let issue = make_issue(TITLE, DESCRIPTION, actor, None);

        let decision = evaluate_vote(&cfg, actor, &issue, &[], None);
        assert!(decision.can_vote);
        assert_eq!(decision.reason, "self-authored");
        assert_eq!(decision.rule, "self_authored");

        // Even when far away.
        let issue = make_issue(TITLE, DESCRIPTION, actor, Some(ISSUE_AT));
        let far = GeoPoint::new(ISSUE_AT.0 + 1.0, ISSUE_AT.1);
        assert_eq!(evaluate_vote(&cfg, actor, &issue, &[], Some(far)).reason, "self-authored");
    }

    #[test]
    fn similar_own_report_allows_vote() {
        let cfg = ScoringConfig::default();
        let actor = Uuid::new_v4();
        let issue = make_issue(TITLE, DESCRIPTION, Uuid::new_v4(), None);
        let own = vec![
            make_issue("Overflowing bin", "Trash everywhere", actor, None),
            make_issue(TITLE, DESCRIPTION, actor, None),
        ];

        let decision = evaluate_vote(&cfg, actor, &issue, &own, None);
        assert!(decision.can_vote);
        assert_eq!(decision.reason, "similar to own report");
    }

    #[test]
    fn weakly_similar_own_report_is_not_enough() {
        let cfg = ScoringConfig::default();
        let actor = Uuid::new_v4();
        let issue = make_issue(TITLE, DESCRIPTION, Uuid::new_v4(), None);
        // Title match only: 0.4, below the 0.5 voting threshold.
        let own = vec![make_issue(TITLE, "Something unrelated entirely", actor, None)];

        let decision = evaluate_vote(&cfg, actor, &issue, &own, None);
        assert!(!decision.can_vote);
        assert_eq!(decision.reason, "location unavailable");
    }

    #[test]
    fn nearby_actor_can_vote() {
        let cfg = ScoringConfig::default();
        let issue = make_issue(TITLE, DESCRIPTION, Uuid::new_v4(), Some(ISSUE_AT));
        // ~1.1km north
        let actor_at = GeoPoint::new(ISSUE_AT.0 + 0.01, ISSUE_AT.1);

        let decision = evaluate_vote(&cfg, Uuid::new_v4(), &issue, &[], Some(actor_at));
        assert!(decision.can_vote);
        assert_eq!(decision.reason, "issue is in your area (~1112m away)");
        assert_eq!(decision.rule, "proximity");
    }

    #[test]
    fn actor_six_km_away_is_too_far() {
        let cfg = ScoringConfig::default();
        let issue = make_issue(TITLE, DESCRIPTION, Uuid::new_v4(), Some(ISSUE_AT));
        let own = vec![make_issue("Broken swing", "Playground swing chain snapped", Uuid::new_v4(), None)];
        // ~6.0km north
        let actor_at = GeoPoint::new(ISSUE_AT.0 + 0.054, ISSUE_AT.1);

        let decision = evaluate_vote(&cfg, Uuid::new_v4(), &issue, &own, Some(actor_at));
        assert!(!decision.can_vote);
        assert!(decision.reason.contains("too far"), "reason={}", decision.reason);
        assert!(decision.reason.contains("~6km"), "reason={}", decision.reason);
        assert_eq!(decision.reason, "issue is too far from your location (~6km away)");
    }

    #[test]
    fn missing_location_denies() {
        let cfg = ScoringConfig::default();
        let actor_at = Some(GeoPoint::new(ISSUE_AT.0, ISSUE_AT.1));

        let no_coords = make_issue(TITLE, DESCRIPTION, Uuid::new_v4(), None);
        let decision = evaluate_vote(&cfg, Uuid::new_v4(), &no_coords, &[], actor_at);
        assert_eq!(
            decision,
            VotingDecision::deny("location_unavailable", "location unavailable")
        );

        let with_coords = make_issue(TITLE, DESCRIPTION, Uuid::new_v4(), Some(ISSUE_AT));
        let decision = evaluate_vote(&cfg, Uuid::new_v4(), &with_coords, &[], None);
        assert!(!decision.can_vote);
        assert_eq!(decision.reason, "location unavailable");

        let decision = evaluate_vote(&cfg, Uuid::new_v4(), &no_coords, &[], None);
        assert_eq!(decision.reason, "location unavailable");
    }

    #[test]
    fn similarity_rule_runs_before_distance() {
        let cfg = ScoringConfig::default();
        let actor = Uuid::new_v4();
        let issue = make_issue(TITLE, DESCRIPTION, Uuid::new_v4(), Some(ISSUE_AT));
        let own = vec![make_issue(TITLE, DESCRIPTION, actor, None)];
        let far = GeoPoint::new(ISSUE_AT.0 + 1.0, ISSUE_AT.1);

        let decision = evaluate_vote(&cfg, actor, &issue, &own, Some(far));
        assert!(decision.can_vote);
        assert_eq!(decision.rule, "similar_own_report");
    }

    #[test]
    fn actor_just_past_radius_sees_decimal_distance() {
        let cfg = ScoringConfig::default();
        let issue = make_issue(TITLE, DESCRIPTION, Uuid::new_v4(), Some(ISSUE_AT));
        // ~5.2km north
        let actor_at = GeoPoint::new(ISSUE_AT.0 + 0.0467, ISSUE_AT.1);

        let decision = evaluate_vote(&cfg, Uuid::new_v4(), &issue, &[], Some(actor_at));
        assert!(!decision.can_vote);
        assert_eq!(decision.reason, "issue is too far from your location (~5.2km away)");
        assert!(!decision.reason.contains("~5km"));
    }

    #[test]
    fn explanation_follows_configured_radius() {
        let cfg = ScoringConfig {
            voting_radius_km: 2.5,
            ..ScoringConfig::default()
        };
        let lines = voting_rules_explanation(&cfg);
        assert!(lines[2].contains("within 2.5 km"), "line={}", lines[2]);

        let evaluator = VotingEvaluator::new(InMemoryIssueRepository::default(), cfg);
        assert_eq!(evaluator.rules_explanation(), lines);
    }

    #[test]
    fn explanation_lists_rules_in_order() {
        let lines = voting_rules_explanation(&ScoringConfig::default());
        assert_eq!(lines.len(), default_rules().len() + 1);
        assert!(lines[0].contains("reported yourself"));
        assert!(lines[1].contains("similar"));
        assert!(lines[2].contains("5 km"));
        assert!(lines[3].contains("unknown"));
    }

    #[tokio::test]
    async fn can_vote_uses_own_issues_from_repository() {
        let actor = Uuid::new_v4();
        let own = make_issue(TITLE, DESCRIPTION, actor, None);
        let issue = make_issue(TITLE, DESCRIPTION, Uuid::new_v4(), None);
        let repo = InMemoryIssueRepository::new(vec![own, issue.clone()]);
        let evaluator = VotingEvaluator::new(repo, ScoringConfig::default());

        let decision = evaluator.can_vote(actor, &issue, None).await;
        assert!(decision.can_vote);
        assert_eq!(decision.reason, "similar to own report");

        let stranger = evaluator.can_vote(Uuid::new_v4(), &issue, None).await;
        assert_eq!(stranger.reason, "location unavailable");
    }

    #[tokio::test]
    async fn repository_failure_falls_through_to_location() {
        let evaluator = VotingEvaluator::new(FailingRepo, ScoringConfig::default());
        let issue = make_issue(TITLE, DESCRIPTION, Uuid::new_v4(), Some(ISSUE_AT));

        let near = GeoPoint::new(ISSUE_AT.0 + 0.001, ISSUE_AT.1);
        let decision = evaluator.can_vote(Uuid::new_v4(), &issue, Some(near)).await;
        assert!(decision.can_vote);
        assert_eq!(decision.rule, "proximity");

        let decision = evaluator.can_vote(Uuid::new_v4(), &issue, None).await;
        assert_eq!(decision.reason, "location unavailable");

        let decision = evaluator.can_vote(issue.author_id, &issue, None).await;
        assert_eq!(decision.reason, "self-authored");
    }

    #[tokio::test]
    async fn prepended_rule_wins() {
        let admin = Uuid::new_v4();
        let evaluator = VotingEvaluator::new(InMemoryIssueRepository::default(), ScoringConfig::default())
            .prepend_rule(Box::new(OverrideRule { actor_id: admin }));
        assert_eq!(
            evaluator.rule_names(),
            vec!["department_override", "self_authored", "similar_own_report", "proximity"]
        );

        let issue = make_issue(TITLE, DESCRIPTION, Uuid::new_v4(), None);
        let decision = evaluator.can_vote(admin, &issue, None).await;
        assert!(decision.can_vote);
        assert_eq!(decision.rule, "department_override");

        let decision = evaluator.can_vote(Uuid::new_v4(), &issue, None).await;
        assert!(!decision.can_vote);
    }
}
