use async_trait::async_trait;
use uuid::Uuid;

use crate::issues::models::{IssueFilter, IssueRecord};
use crate::issues::repositories::IssueRepository;
use civic_common::error::CivicResult;

/// `Vec`-backed repository. Records are returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueRepository {
    issues: Vec<IssueRecord>,
}

impl InMemoryIssueRepository {
    pub fn new(issues: Vec<IssueRecord>) -> Self {
        Self { issues }
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

#[async_trait]
impl IssueRepository for InMemoryIssueRepository {
    async fn get_all(&self, filter: IssueFilter) -> CivicResult<Vec<IssueRecord>> {
        let matching = self
            .issues
            .iter()
            .filter(|i| filter.category_id.is_none() || i.category_id == filter.category_id)
            .cloned();

        let issues = match filter.limit {
            Some(limit) => matching.take(usize::try_from(limit).unwrap_or(0)).collect(),
            None => matching.collect(),
        };
        Ok(issues)
    }

    async fn get_by_author(&self, author_id: Uuid) -> CivicResult<Vec<IssueRecord>> {
        Ok(self
            .issues
            .iter()
            .filter(|i| i.author_id == author_id)
            .cloned()
            .collect())
    }
}
