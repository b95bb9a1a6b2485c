//! In-memory job store.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jobchat_application::{JobStorePort, StoreError};
use jobchat_domain::{Company, Job, JobFilters, JobLevel, JobPage};

/// Job store backed by plain vectors.
///
/// Immutable after construction; safe to share across concurrent requests.
pub struct InMemoryJobStore {
    jobs: Vec<Job>,
    companies: Vec<Company>,
}

impl InMemoryJobStore {
    pub fn new(jobs: Vec<Job>, companies: Vec<Company>) -> Self {
        Self { jobs, companies }
    }

    /// A small board of fixture postings for local runs and tests.
    pub fn seeded() -> Self {
        let companies = vec![
            company(1, "TechCorp", "Enterprise platform engineering", "San Francisco, CA"),
            company(2, "DataFlow Inc", "Data pipelines and analytics", "New York, NY"),
            company(3, "CloudNine Systems", "Managed cloud infrastructure", "Remote"),
            company(4, "WebWorks Studio", "Product design and web apps", "London, UK"),
        ];

        let jobs = vec![
            job(
                1,
                "Senior Full-Stack Engineer",
                "Own features end to end across a TypeScript/Rust stack.",
                "Remote",
                Some("$140k-$180k"),
                JobLevel::Senior,
                &companies[0],
                1,
            ),
            job(
                2,
                "DevOps Engineer",
                "Build and run CI/CD and infrastructure automation.",
                "San Francisco, CA",
                Some("$120k-$150k"),
                JobLevel::Middle,
                &companies[0],
                3,
            ),
            job(
                3,
                "Machine Learning Engineer",
                "Productionize models over streaming data.",
                "New York, NY",
                Some("$150k-$190k"),
                JobLevel::Senior,
                &companies[1],
                5,
            ),
            job(
                4,
                "Data Engineer",
                "Design warehouse schemas and ELT pipelines.",
                "Remote",
                None,
                JobLevel::Middle,
                &companies[1],
                7,
            ),
            job(
                5,
                "Cloud Architect",
                "Lead multi-region platform architecture.",
                "Remote",
                Some("$170k-$210k"),
                JobLevel::Lead,
                &companies[2],
                2,
            ),
            job(
                6,
                "Junior Frontend Developer",
                "Ship UI components with a senior mentor.",
                "London, UK",
                Some("£35k-£45k"),
                JobLevel::Junior,
                &companies[3],
                4,
            ),
            job(
                7,
                "Senior Rust Engineer",
                "Build the core job-matching services in Rust.",
                "Remote",
                Some("$150k-$185k"),
                JobLevel::Senior,
                &companies[2],
                6,
            ),
        ];

        Self::new(jobs, companies)
    }
}

fn company(id: i64, name: &str, description: &str, location: &str) -> Company {
    Company {
        id,
        name: name.to_string(),
        description: description.to_string(),
        location: location.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn job(
    id: i64,
    title: &str,
    description: &str,
    location: &str,
    salary: Option<&str>,
    level: JobLevel,
    company: &Company,
    days_old: i64,
) -> Job {
    Job {
        id,
        title: title.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        salary: salary.map(|s| s.to_string()),
        level,
        company: company.clone(),
        created_at: Utc::now() - Duration::days(days_old),
    }
}

#[async_trait]
impl JobStorePort for InMemoryJobStore {
    async fn get_job(&self, job_id: i64) -> Result<Option<Job>, StoreError> {
        Ok(self.jobs.iter().find(|j| j.id == job_id).cloned())
    }

    async fn search_jobs(&self, filters: &JobFilters) -> Result<JobPage, StoreError> {
        let mut matching: Vec<&Job> = self.jobs.iter().filter(|j| filters.matches(j)).collect();
        // Newest first, matching the board's listing order
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(filters.skip)
            .take(filters.clamped_limit())
            .cloned()
            .collect();

        Ok(JobPage { items, total })
    }

    async fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        let mut companies = self.companies.clone();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(companies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_job_by_id() {
        let store = InMemoryJobStore::seeded();
        let job = store.get_job(7).await.unwrap().unwrap();
        assert_eq!(job.title, "Senior Rust Engineer");
        assert!(store.get_job(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn search_filters_by_level_and_location() {
        let store = InMemoryJobStore::seeded();
        let filters = JobFilters::new()
            .with_level(JobLevel::Senior)
            .with_location("Remote");

        let page = store.search_jobs(&filters).await.unwrap();
        assert_eq!(page.total, 2);
        assert!(
            page.items
                .iter()
                .all(|j| j.level == JobLevel::Senior && j.location == "Remote")
        );
    }

    #[tokio::test]
    async fn search_orders_newest_first() {
        let store = InMemoryJobStore::seeded();
        let page = store.search_jobs(&JobFilters::new()).await.unwrap();

        let dates: Vec<_> = page.items.iter().map(|j| j.created_at).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[tokio::test]
    async fn search_paginates() {
        let store = InMemoryJobStore::seeded();
        let page = store
            .search_jobs(&JobFilters::new().with_limit(3))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 7);

        let mut filters = JobFilters::new().with_limit(3);
        filters.skip = 6;
        let last = store.search_jobs(&filters).await.unwrap();
        assert_eq!(last.items.len(), 1);
    }

    #[tokio::test]
    async fn companies_are_sorted_by_name() {
        let store = InMemoryJobStore::seeded();
        let companies = store.list_companies().await.unwrap();
        assert_eq!(companies[0].name, "CloudNine Systems");
        assert_eq!(companies.len(), 4);
    }
}
