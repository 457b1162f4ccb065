use civic_db::issues::models::IssueRecord;

use crate::draft::IssueDraft;
use crate::geo::{distance_between, format_meters};
use crate::trace::SignalResult;

use super::Scorer;

/// Linear proximity decay: 1 at the same spot, 0 at the radius boundary and
/// beyond.
pub struct LocationProximityScorer {
    pub weight: f64,
    pub radius_km: f64,
}

impl LocationProximityScorer {
    fn proximity(&self, distance_km: f64) -> f64 {
        if !distance_km.is_finite() || distance_km > self.radius_km {
            return 0.0;
        }
        if self.radius_km <= 0.0 {
            return if distance_km <= 0.0 { 1.0 } else { 0.0 };
        }
        (1.0 - distance_km / self.radius_km).clamp(0.0, 1.0)
    }
}

impl Scorer for LocationProximityScorer {
    fn name(&self) -> &'static str {
        "location_proximity"
    }

    fn score(&self, draft: &IssueDraft, existing: &IssueRecord) -> SignalResult {
        let (score, reason, detail) = match (draft.coordinates(), existing.coordinates()) {
            (Some(a), Some(b)) => {
                let distance_km = distance_between(a, b);
                let within = distance_km <= self.radius_km;
                let reason =
                    within.then(|| format!("Same location ({} away)", format_meters(distance_km)));
                (
                    self.proximity(distance_km),
                    reason,
                    format!("distance_km={distance_km:.4} radius_km={}", self.radius_km),
                )
            }
            _ => (0.0, None, "coordinates missing".to_string()),
        };

        SignalResult {
            signal: self.name().to_string(),
            score,
            weight: self.weight,
            weighted_score: score * self.weight,
            reason,
            detail,
        }
    }
}
