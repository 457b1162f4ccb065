use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::issues::models::{IssueFilter, IssueRecord};
use crate::issues::repositories::IssueRepository;
use civic_common::error::{CivicError, CivicResult};

const ISSUE_COLUMNS: &str = "id, title, description, category_id, \
     latitude::float8 as latitude, longitude::float8 as longitude, \
     author_id, created_at";

/// Read-only Postgres adapter over the `issues` table.
pub struct PgIssueRepository {
    pool: PgPool,
}

impl PgIssueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_issue_row(row: PgRow) -> IssueRecord {
        IssueRecord {
            id: row.get("id"),
            title: row.get("title"),
            description: row.get("description"),
            category_id: row.get("category_id"),
            latitude: row.get("latitude"),
            longitude: row.get("longitude"),
            author_id: row.get("author_id"),
            created_at: row.get("created_at"),
        }
    }

    fn get_all_query(filter: &IssueFilter) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("select {ISSUE_COLUMNS} from issues where 1=1"));

        if let Some(category_id) = filter.category_id {
            qb.push(" and category_id = ").push_bind(category_id);
        }

        qb.push(" order by created_at desc");
        if let Some(limit) = filter.limit {
            qb.push(" limit ").push_bind(limit);
        }
        qb
    }
}

#[async_trait]
impl IssueRepository for PgIssueRepository {
    async fn get_all(&self, filter: IssueFilter) -> CivicResult<Vec<IssueRecord>> {
        let mut qb = Self::get_all_query(&filter);
        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CivicError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::map_issue_row).collect())
    }

    async fn get_by_author(&self, author_id: Uuid) -> CivicResult<Vec<IssueRecord>> {
        let sql =
            format!("select {ISSUE_COLUMNS} from issues where author_id = $1 order by created_at desc");
        let rows = sqlx::query(&sql)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| CivicError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::map_issue_row).collect())
    }
}
