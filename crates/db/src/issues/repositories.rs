use async_trait::async_trait;
use uuid::Uuid;

use crate::issues::models::{IssueFilter, IssueRecord};
use civic_common::error::CivicResult;

/// Read side of the issue store consumed by duplicate detection and voting.
#[async_trait]
pub trait IssueRepository: Send + Sync {
    async fn get_all(&self, filter: IssueFilter) -> CivicResult<Vec<IssueRecord>>;
    async fn get_by_author(&self, author_id: Uuid) -> CivicResult<Vec<IssueRecord>>;
}
