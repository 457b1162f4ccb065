use serde::{Deserialize, Serialize};

/// Outcome of one similarity signal for a single draft/issue pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalResult {
    pub signal: String,
    pub score: f64,
    pub weight: f64,
    pub weighted_score: f64,
    /// Human-readable explanation, present only when the signal is strong
    /// enough to be worth showing to the reporter.
    pub reason: Option<String>,
    pub detail: String,
}
