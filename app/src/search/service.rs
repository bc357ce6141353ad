use std::time::{Duration, Instant};

use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseTransaction, DbBackend, DbErr, IsolationLevel,
    TransactionTrait,
};
use tally::DbConnection;

use super::aggregate::{self, SearchResultRow};
use super::count;
use super::criteria::{Pagination, SearchCriteria};
use super::error::SearchError;
use super::join::SearchPlan;
use super::page::PagedResult;
use crate::config::SearchConfig;

/// Runs todo searches against one pool
///
/// Holds no per-request state, so a single instance may serve concurrent
/// searches.
#[derive(Clone)]
pub struct TodoSearch {
    db: DbConnection,
    timeout: Duration,
}

impl TodoSearch {
    pub fn new(db: DbConnection, config: &SearchConfig) -> Self {
        Self {
            db,
            timeout: config.query_timeout,
        }
    }

    /// One page of todos matching `criteria`, newest first
    ///
    /// The count and the page are read in the same transaction, so iterating
    /// every page yields exactly `total` rows as long as the data does not
    /// change between requests. Dropping the returned future cancels the
    /// in-flight query and rolls the transaction back.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        page: i64,
        size: i64,
    ) -> Result<PagedResult<SearchResultRow>, SearchError> {
        let pagination = Pagination::new(page, size)?;
        let plan = SearchPlan::new(criteria);
        let started = Instant::now();

        let (rows, total) = tokio::time::timeout(self.timeout, self.read_page(&plan, pagination))
            .await
            .map_err(|_| {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "todo search timed out"
                );
                SearchError::Timeout(self.timeout)
            })?
            .map_err(|e| {
                tracing::error!(error = %e, "todo search failed");
                SearchError::Store(e)
            })?;

        tracing::debug!(
            page = pagination.page(),
            size = pagination.size(),
            total,
            returned = rows.len(),
            assignee_join = ?plan.assignee_join(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "todo search finished"
        );

        Ok(PagedResult::assemble(rows, total, pagination))
    }

    async fn read_page(
        &self,
        plan: &SearchPlan,
        pagination: Pagination,
    ) -> Result<(Vec<SearchResultRow>, u64), DbErr> {
        let txn = self.begin_snapshot().await?;

        let total = count::count_matches(&txn, plan).await?;
        let rows = if pagination.offset() < total {
            aggregate::fetch_rows(&txn, plan, pagination).await?
        } else {
            Vec::new()
        };

        txn.commit().await?;
        Ok((rows, total))
    }

    /// Read-only snapshot where the backend supports one; SQLite
    /// transactions are already serializable
    async fn begin_snapshot(&self) -> Result<DatabaseTransaction, DbErr> {
        let db = self.db.inner();
        match db.get_database_backend() {
            DbBackend::Postgres => {
                db.begin_with_config(
                    Some(IsolationLevel::RepeatableRead),
                    Some(AccessMode::ReadOnly),
                )
                .await
            }
            _ => db.begin().await,
        }
    }
}
