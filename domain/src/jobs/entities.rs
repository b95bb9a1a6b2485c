//! Job-board entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seniority level of a job posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobLevel {
    Junior,
    Middle,
    Senior,
    Lead,
}

impl JobLevel {
    pub fn as_str(&self) -> &str {
        match self {
            JobLevel::Junior => "junior",
            JobLevel::Middle => "middle",
            JobLevel::Senior => "senior",
            JobLevel::Lead => "lead",
        }
    }

    /// Parse a level from its wire form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "junior" => Some(JobLevel::Junior),
            "middle" => Some(JobLevel::Middle),
            "senior" => Some(JobLevel::Senior),
            "lead" => Some(JobLevel::Lead),
            _ => None,
        }
    }
}

impl std::fmt::Display for JobLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A company that posts jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub location: String,
}

/// A job posting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    pub level: JobLevel,
    pub company: Company,
    pub created_at: DateTime<Utc>,
}

/// Filter and pagination parameters for job search.
///
/// `location` and `search` match case-insensitively as substrings
/// (`location` against the job location, `search` against title and
/// description). `limit` is clamped to 1..=100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFilters {
    pub location: Option<String>,
    pub level: Option<JobLevel>,
    pub search: Option<String>,
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "JobFilters::default_limit")]
    pub limit: usize,
}

impl Default for JobFilters {
    fn default() -> Self {
        Self::new()
    }
}

impl JobFilters {
    pub const MAX_LIMIT: usize = 100;

    fn default_limit() -> usize {
        Self::MAX_LIMIT
    }

    pub fn new() -> Self {
        Self {
            location: None,
            level: None,
            search: None,
            skip: 0,
            limit: Self::MAX_LIMIT,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_level(mut self, level: JobLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Effective page size after clamping.
    pub fn clamped_limit(&self) -> usize {
        self.limit.clamp(1, Self::MAX_LIMIT)
    }

    /// Check whether a job passes the filter part (ignores pagination).
    pub fn matches(&self, job: &Job) -> bool {
        if let Some(location) = &self.location
            && !job
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
        {
            return false;
        }

        if let Some(level) = self.level
            && job.level != level
        {
            return false;
        }

        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !job.title.to_lowercase().contains(&needle)
                && !job.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        true
    }
}

/// One page of a filtered job listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPage {
    pub items: Vec<Job>,
    /// Total number of jobs matching the filters, before pagination
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: i64, title: &str, location: &str, level: JobLevel) -> Job {
        Job {
            id,
            title: title.to_string(),
            description: format!("{} role", title),
            location: location.to_string(),
            salary: None,
            level,
            company: Company {
                id: 1,
                name: "Acme".to_string(),
                description: "Widgets".to_string(),
                location: "Berlin".to_string(),
            },
            created_at: Utc::now(),
        }
    }

    #[test]
    fn level_round_trip() {
        for level in [
            JobLevel::Junior,
            JobLevel::Middle,
            JobLevel::Senior,
            JobLevel::Lead,
        ] {
            assert_eq!(JobLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(JobLevel::parse("principal"), None);
    }

    #[test]
    fn filters_match_location_case_insensitive() {
        let filters = JobFilters::new().with_location("remote");
        assert!(filters.matches(&job(1, "Rust Engineer", "Remote", JobLevel::Senior)));
        assert!(!filters.matches(&job(2, "Rust Engineer", "Berlin", JobLevel::Senior)));
    }

    #[test]
    fn filters_match_level_exact() {
        let filters = JobFilters::new().with_level(JobLevel::Senior);
        assert!(filters.matches(&job(1, "Engineer", "Remote", JobLevel::Senior)));
        assert!(!filters.matches(&job(2, "Engineer", "Remote", JobLevel::Junior)));
    }

    #[test]
    fn filters_search_title_and_description() {
        let filters = JobFilters::new().with_search("rust");
        assert!(filters.matches(&job(1, "Rust Engineer", "Remote", JobLevel::Senior)));
        assert!(!filters.matches(&job(2, "Go Engineer", "Remote", JobLevel::Senior)));
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(JobFilters::new().with_limit(0).clamped_limit(), 1);
        assert_eq!(JobFilters::new().with_limit(500).clamped_limit(), 100);
        assert_eq!(JobFilters::new().with_limit(20).clamped_limit(), 20);
    }
}
