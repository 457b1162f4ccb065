use civic_db::issues::models::{GeoPoint, IssueRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A report being compared against the existing corpus. Usually a freshly
/// drafted submission, but any [`IssueRecord`] can be viewed as one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueDraft {
    pub title: String,
    pub description: String,
    pub category_id: Option<Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl IssueDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_location(mut self, lat: f64, lng: f64) -> Self {
        self.latitude = Some(lat);
        self.longitude = Some(lng);
        self
    }

    pub fn coordinates(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }
}

impl From<&IssueRecord> for IssueDraft {
    fn from(issue: &IssueRecord) -> Self {
        Self {
            title: issue.title.clone(),
            description: issue.description.clone(),
            category_id: issue.category_id,
            latitude: issue.latitude,
            longitude: issue.longitude,
        }
    }
}
