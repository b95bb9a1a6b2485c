//! Job-board tool executor — the concrete implementation of `ToolExecutorPort`.
//!
//! Dispatch pipeline for one call:
//!
//! ```text
//! lookup name ──miss──▶ NOT_FOUND failure
//!    │
//! validate args ──miss/typo──▶ INVALID_ARGUMENT failure (handler not invoked)
//!    │
//! run handler under a timeout ──late──▶ TIMEOUT failure
//!    │
//! ToolResult (success or handler-reported failure)
//! ```
//!
//! Every path resolves to a `ToolResult`; a broken or hung tool degrades to
//! a failure the model can react to and never stalls the whole turn past
//! its time budget.

use async_trait::async_trait;
use jobchat_application::{JobStorePort, ToolExecutorPort};
use jobchat_domain::{DefaultToolValidator, ToolCall, ToolError, ToolResult, ToolSpec, ToolValidator};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::{GET_JOB, LIST_COMPANIES, SEARCH_JOBS, jobs};

/// Executor that routes the closed job-board tool set over the store port.
pub struct JobBoardToolExecutor {
    tool_spec: ToolSpec,
    store: Arc<dyn JobStorePort>,
    tool_timeout: Duration,
}

impl JobBoardToolExecutor {
    /// Create an executor with the full catalog.
    pub fn new(store: Arc<dyn JobStorePort>) -> Self {
        Self {
            tool_spec: super::default_tool_spec(),
            store,
            tool_timeout: Duration::from_secs(30),
        }
    }

    /// Override the per-call time budget.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        match call.tool_name.as_str() {
            SEARCH_JOBS => jobs::execute_search_jobs(self.store.as_ref(), call).await,
            GET_JOB => jobs::execute_get_job(self.store.as_ref(), call).await,
            LIST_COMPANIES => jobs::execute_list_companies(self.store.as_ref(), call).await,
            // Registered names and dispatch arms are kept in lockstep in
            // this module; a miss here means a wiring bug, surfaced as data.
            other => ToolResult::failure(
                &call.call_id,
                &call.tool_name,
                ToolError::execution_failed(format!("Tool '{}' is not implemented", other)),
            ),
        }
    }
}

#[async_trait]
impl ToolExecutorPort for JobBoardToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        // Unknown tool is a recoverable outcome the model can react to
        let definition = match self.tool_spec.get(&call.tool_name) {
            Some(d) => d,
            None => {
                return ToolResult::failure(
                    &call.call_id,
                    &call.tool_name,
                    ToolError::not_found(format!("Unknown tool: {}", call.tool_name)),
                );
            }
        };

        // Validate before touching the handler
        let validator = DefaultToolValidator;
        if let Err(e) = validator.validate(call, definition) {
            return ToolResult::failure(
                &call.call_id,
                &call.tool_name,
                ToolError::invalid_argument(e),
            );
        }

        debug!(tool = %call.tool_name, call_id = %call.call_id, "Dispatching tool call");
        match tokio::time::timeout(self.tool_timeout, self.dispatch(call)).await {
            Ok(result) => result,
            Err(_) => ToolResult::failure(
                &call.call_id,
                &call.tool_name,
                ToolError::timeout(call.tool_name.clone()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryJobStore;
    use jobchat_application::StoreError;
    use jobchat_domain::{Company, Job, JobFilters, JobPage};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store wrapper that counts how often handlers actually reach it.
    struct CountingStore {
        inner: InMemoryJobStore,
        calls: AtomicUsize,
    }

    impl CountingStore {
        fn new() -> Self {
            Self {
                inner: InMemoryJobStore::seeded(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl JobStorePort for CountingStore {
        async fn get_job(&self, job_id: i64) -> Result<Option<Job>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get_job(job_id).await
        }

        async fn search_jobs(&self, filters: &JobFilters) -> Result<JobPage, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.search_jobs(filters).await
        }

        async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.list_companies().await
        }
    }

    /// Store whose queries always fail.
    struct BrokenStore;

    #[async_trait]
    impl JobStorePort for BrokenStore {
        async fn get_job(&self, _job_id: i64) -> Result<Option<Job>, StoreError> {
            Err(StoreError::QueryFailed("db connection lost".to_string()))
        }

        async fn search_jobs(&self, _filters: &JobFilters) -> Result<JobPage, StoreError> {
            Err(StoreError::QueryFailed("db connection lost".to_string()))
        }

        async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
            Err(StoreError::QueryFailed("db connection lost".to_string()))
        }
    }

    /// Store whose queries never resolve.
    struct HangingStore;

    #[async_trait]
    impl JobStorePort for HangingStore {
        async fn get_job(&self, _job_id: i64) -> Result<Option<Job>, StoreError> {
            std::future::pending().await
        }

        async fn search_jobs(&self, _filters: &JobFilters) -> Result<JobPage, StoreError> {
            std::future::pending().await
        }

        async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
            std::future::pending().await
        }
    }

    fn executor() -> JobBoardToolExecutor {
        JobBoardToolExecutor::new(Arc::new(InMemoryJobStore::seeded()))
    }

    #[tokio::test]
    async fn unknown_tool_is_a_failure_result() {
        let call = ToolCall::new("c1", "frobnicate");
        let result = executor().execute(&call).await;

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "NOT_FOUND");
        assert_eq!(
            result.payload(),
            serde_json::json!({ "error": "Unknown tool: frobnicate" })
        );
    }

    #[tokio::test]
    async fn missing_required_field_never_reaches_the_handler() {
        let store = Arc::new(CountingStore::new());
        let executor = JobBoardToolExecutor::new(store.clone());

        let call = ToolCall::new("c1", "get_job");
        let result = executor.execute(&call).await;

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "INVALID_ARGUMENT");
        assert_eq!(result.error().unwrap().message, "Missing field: job_id");
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn wrong_type_never_reaches_the_handler() {
        let store = Arc::new(CountingStore::new());
        let executor = JobBoardToolExecutor::new(store.clone());

        let call = ToolCall::new("c1", "get_job").with_arg("job_id", "seven");
        let result = executor.execute(&call).await;

        assert!(!result.is_success());
        assert!(result.error().unwrap().message.contains("job_id"));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_search_executes() {
        let call = ToolCall::new("c1", "search_jobs")
            .with_arg("level", "senior")
            .with_arg("location", "Remote");
        let result = executor().execute(&call).await;

        assert!(result.is_success());
        assert_eq!(result.payload()["count"], 2);
    }

    #[tokio::test]
    async fn handler_failure_preserves_its_message() {
        let executor = JobBoardToolExecutor::new(Arc::new(BrokenStore));

        let call = ToolCall::new("c1", "search_jobs");
        let result = executor.execute(&call).await;

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "EXECUTION_FAILED");
        assert!(
            result
                .error()
                .unwrap()
                .message
                .contains("db connection lost")
        );
    }

    #[tokio::test]
    async fn hung_handler_degrades_to_timeout_failure() {
        let executor = JobBoardToolExecutor::new(Arc::new(HangingStore))
            .with_timeout(Duration::from_millis(20));

        let call = ToolCall::new("c1", "list_companies");
        let result = executor.execute(&call).await;

        assert!(!result.is_success());
        assert_eq!(result.error().unwrap().code, "TIMEOUT");
    }

    #[tokio::test]
    async fn batch_preserves_request_order() {
        let executor = executor();
        let calls = vec![
            ToolCall::new("c1", "search_jobs").with_arg("level", "senior"),
            ToolCall::new("c2", "get_job").with_arg("job_id", 1),
            ToolCall::new("c3", "list_companies"),
        ];

        let results = executor.execute_batch(&calls).await;
        let ids: Vec<&str> = results.iter().map(|r| r.call_id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
    }
}
