pub mod config;
pub mod draft;
pub mod duplicates;
pub mod engine;
pub mod geo;
pub mod scorers;
pub mod text;
pub mod trace;
pub mod voting;

pub use config::ScoringConfig;
pub use draft::IssueDraft;
pub use duplicates::{rank_candidates, DuplicateChecker, DuplicationCheckResult};
pub use engine::{score, SimilarityResult};
pub use voting::{evaluate_vote, voting_rules_explanation, VotingDecision, VotingEvaluator};
