//! Job-board tool implementations.
//!
//! The closed set of lookups the model may request, enumerated once at
//! startup. Adding a tool means adding its name constant, its definition in
//! [`default_tool_spec`], and its arm in the executor's dispatch match —
//! there is no runtime registration.

pub mod executor;
pub mod jobs;

pub use executor::JobBoardToolExecutor;

use jobchat_domain::{ToolDefinition, ToolParameter, ToolSpec};

/// Search job postings with filters and pagination.
pub const SEARCH_JOBS: &str = "search_jobs";
/// Fetch one job posting by id.
pub const GET_JOB: &str = "get_job";
/// List the companies on the board.
pub const LIST_COMPANIES: &str = "list_companies";

/// The full tool catalog advertised to the model.
pub fn default_tool_spec() -> ToolSpec {
    ToolSpec::new()
        .register(
            ToolDefinition::new(
                SEARCH_JOBS,
                "Search job postings. All filters are optional; results are newest first.",
            )
            .with_parameter(ToolParameter::new(
                "location",
                "Filter by location substring, e.g. 'Remote' or 'Berlin'",
                false,
            ))
            .with_parameter(ToolParameter::new(
                "level",
                "Filter by seniority: junior, middle, senior, or lead",
                false,
            ))
            .with_parameter(ToolParameter::new(
                "search",
                "Free-text search over title and description",
                false,
            ))
            .with_parameter(
                ToolParameter::new("limit", "Maximum results to return (1-100)", false)
                    .with_type("integer"),
            ),
        )
        .register(
            ToolDefinition::new(GET_JOB, "Fetch one job posting by id, with company details.")
                .with_parameter(
                    ToolParameter::new("job_id", "Id of the job to fetch", true)
                        .with_type("integer"),
                ),
        )
        .register(ToolDefinition::new(
            LIST_COMPANIES,
            "List all companies that post on the board.",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_contains_the_closed_tool_set() {
        let spec = default_tool_spec();
        assert_eq!(spec.len(), 3);
        assert!(spec.get(SEARCH_JOBS).is_some());
        assert!(spec.get(GET_JOB).is_some());
        assert!(spec.get(LIST_COMPANIES).is_some());
    }

    #[test]
    fn get_job_requires_its_id() {
        let spec = default_tool_spec();
        let get_job = spec.get(GET_JOB).unwrap();
        assert!(get_job.parameters.iter().any(|p| p.name == "job_id" && p.required));
    }
}
