// Record store module.
// The only way the service touches persistence: list / insert / count.

pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::candidate::{Candidate, CandidateFilter, NewCandidate};
use crate::models::job::{CreateJob, Job, JobFilter};

pub use postgres::PgStore;

/// A persisted record type: how it is created and filtered.
pub trait Record: Clone + Send + Sync + 'static {
    type New: Send + 'static;
    type Filter: Send + Sync;

    fn build(id: i32, created_at: DateTime<Utc>, input: Self::New) -> Self;
    fn matches(&self, filter: &Self::Filter) -> bool;
}

#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Records matching `filter`, newest first.
    async fn list(&self, filter: &R::Filter) -> Result<Vec<R>, AppError>;

    async fn insert(&self, input: R::New) -> Result<R, AppError>;

    async fn count(&self, filter: &R::Filter) -> Result<i64, AppError>;
}

impl Record for Candidate {
    type New = NewCandidate;
    type Filter = CandidateFilter;

    fn build(id: i32, created_at: DateTime<Utc>, input: NewCandidate) -> Self {
        Candidate {
            id,
            full_name: input.full_name,
            email: input.email,
            phone: input.phone,
            skills: input.skills,
            position_detected: input.position_detected,
            source: input.source,
            source_link: input.source_link,
            created_at,
        }
    }

    fn matches(&self, filter: &CandidateFilter) -> bool {
        Candidate::matches(self, filter)
    }
}

impl Record for Job {
    type New = CreateJob;
    type Filter = JobFilter;

    fn build(id: i32, created_at: DateTime<Utc>, input: CreateJob) -> Self {
        Job {
            id,
            title: input.title,
            department: input.department,
            employment_type: input.employment_type,
            modality: input.modality,
            description: input.description,
            requirements: input.requirements,
            salary_range: input.salary_range,
            status: input.status,
            created_at,
        }
    }

    fn matches(&self, filter: &JobFilter) -> bool {
        Job::matches(self, filter)
    }
}

/// Process-local store used when no database is configured, and in tests.
pub struct MemoryStore<R> {
    records: RwLock<Vec<R>>,
}

impl<R> Default for MemoryStore<R> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<R> MemoryStore<R> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryStore<R> {
    async fn list(&self, filter: &R::Filter) -> Result<Vec<R>, AppError> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .rev()
            .filter(|r| r.matches(filter))
            .cloned()
            .collect())
    }

    async fn insert(&self, input: R::New) -> Result<R, AppError> {
        let mut records = self.records.write().await;
        let id = i32::try_from(records.len() + 1)
            .map_err(|_| AppError::Internal("Memory store is full".to_string()))?;
        let record = R::build(id, Utc::now(), input);
        records.push(record.clone());
        Ok(record)
    }

    async fn count(&self, filter: &R::Filter) -> Result<i64, AppError> {
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| r.matches(filter)).count() as i64)
    }
}
