//! Job store port
//!
//! The domain data store is an external collaborator; only its query
//! interface is consumed here. The chat tools are its sole callers.

use async_trait::async_trait;
use jobchat_domain::{Company, Job, JobFilters, JobPage};
use thiserror::Error;

/// Errors surfaced by the store.
///
/// Tool handlers convert these into failure `ToolResult`s — a broken store
/// never crashes the exchange.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store query failed: {0}")]
    QueryFailed(String),
}

/// Read-only access to the job board's records.
#[async_trait]
pub trait JobStorePort: Send + Sync {
    /// Look up one job by id.
    async fn get_job(&self, job_id: i64) -> Result<Option<Job>, StoreError>;

    /// Filtered, paginated job listing, newest first.
    async fn search_jobs(&self, filters: &JobFilters) -> Result<JobPage, StoreError>;

    /// All companies, ordered by name.
    async fn list_companies(&self) -> Result<Vec<Company>, StoreError>;
}
