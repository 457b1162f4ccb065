use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Build a point only when both halves of the pair are present.
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Some(Self { lat, lng }),
            _ => None,
        }
    }
}

/// An issue already reported by a citizen. Read-only from the engine's side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueRecord {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Option<Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl IssueRecord {
    pub fn coordinates(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }
}

/// Corpus retrieval filter. Both fields are optional narrowing hints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueFilter {
    pub category_id: Option<Uuid>,
    pub limit: Option<i64>,
}
