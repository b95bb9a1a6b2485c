//! Handlers for the job-board tools.
//!
//! Each handler reads only the job store port and resolves to a
//! `ToolResult` — store failures and missing records are failure results,
//! never errors that escape to the orchestrator. Payloads are compact
//! summaries: enough for the model to answer from, not full records.

use jobchat_application::JobStorePort;
use jobchat_domain::{Job, JobFilters, JobLevel, ToolCall, ToolError, ToolResult};
use serde_json::{Value, json};

/// `search_jobs {location?, level?, search?, limit?}` → `{count, items}`
pub async fn execute_search_jobs(store: &dyn JobStorePort, call: &ToolCall) -> ToolResult {
    let mut filters = JobFilters::new();

    if let Some(location) = call.get_string("location") {
        filters.location = Some(location.to_string());
    }
    if let Some(level) = call.get_string("level") {
        match JobLevel::parse(level) {
            Some(level) => filters.level = Some(level),
            None => {
                return ToolResult::failure(
                    &call.call_id,
                    &call.tool_name,
                    ToolError::invalid_argument(format!(
                        "Invalid value for field 'level': '{}' (expected junior, middle, senior, or lead)",
                        level
                    )),
                );
            }
        }
    }
    if let Some(search) = call.get_string("search") {
        filters.search = Some(search.to_string());
    }
    if let Some(limit) = call.get_i64("limit") {
        filters.limit = limit.max(0) as usize;
    }

    match store.search_jobs(&filters).await {
        Ok(page) => {
            let items: Vec<Value> = page.items.iter().map(job_summary).collect();
            ToolResult::success(
                &call.call_id,
                &call.tool_name,
                json!({ "count": page.total, "items": items }),
            )
        }
        Err(e) => ToolResult::failure(
            &call.call_id,
            &call.tool_name,
            ToolError::execution_failed(e.to_string()),
        ),
    }
}

/// `get_job {job_id}` → the job record, or a `Job not found` failure
pub async fn execute_get_job(store: &dyn JobStorePort, call: &ToolCall) -> ToolResult {
    // `job_id` presence and type are guaranteed by schema validation
    let job_id = call.get_i64("job_id").unwrap_or_default();

    match store.get_job(job_id).await {
        Ok(Some(job)) => ToolResult::success(&call.call_id, &call.tool_name, job_detail(&job)),
        Ok(None) => ToolResult::failure(
            &call.call_id,
            &call.tool_name,
            ToolError::not_found(format!("Job not found: {}", job_id)),
        ),
        Err(e) => ToolResult::failure(
            &call.call_id,
            &call.tool_name,
            ToolError::execution_failed(e.to_string()),
        ),
    }
}

/// `list_companies {}` → `{count, items}`
pub async fn execute_list_companies(store: &dyn JobStorePort, call: &ToolCall) -> ToolResult {
    match store.list_companies().await {
        Ok(companies) => {
            let items: Vec<Value> = companies
                .iter()
                .map(|c| {
                    json!({
                        "id": c.id,
                        "name": c.name,
                        "location": c.location,
                        "description": c.description,
                    })
                })
                .collect();
            ToolResult::success(
                &call.call_id,
                &call.tool_name,
                json!({ "count": items.len(), "items": items }),
            )
        }
        Err(e) => ToolResult::failure(
            &call.call_id,
            &call.tool_name,
            ToolError::execution_failed(e.to_string()),
        ),
    }
}

fn job_summary(job: &Job) -> Value {
    json!({
        "id": job.id,
        "title": job.title,
        "company": job.company.name,
        "location": job.location,
        "level": job.level.as_str(),
        "salary": job.salary,
    })
}

fn job_detail(job: &Job) -> Value {
    json!({
        "id": job.id,
        "title": job.title,
        "description": job.description,
        "location": job.location,
        "level": job.level.as_str(),
        "salary": job.salary,
        "posted_at": job.created_at.to_rfc3339(),
        "company": {
            "id": job.company.id,
            "name": job.company.name,
            "location": job.company.location,
        },
    })
}
