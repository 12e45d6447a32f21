use async_trait::async_trait;
use sqlx::PgPool;

use super::RecordStore;
use crate::error::AppError;
use crate::models::candidate::{Candidate, CandidateFilter, NewCandidate};
use crate::models::job::{CreateJob, Job, JobFilter};

/// PostgreSQL-backed store for candidates and vacancies.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// $1 is a ready-made pattern from `search_pattern`.
const CANDIDATE_FILTER: &str = "($1::text IS NULL \
    OR full_name ILIKE $1 ESCAPE '\\' \
    OR position_detected ILIKE $1 ESCAPE '\\' \
    OR EXISTS (SELECT 1 FROM unnest(skills) AS s WHERE s ILIKE $1 ESCAPE '\\'))";

/// Substring pattern for ILIKE. `%` and `_` in the term match literally.
fn search_pattern(filter: &CandidateFilter) -> Option<String> {
    let term = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())?;
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

#[async_trait]
impl RecordStore<Candidate> for PgStore {
    async fn list(&self, filter: &CandidateFilter) -> Result<Vec<Candidate>, AppError> {
        let sql = format!(
            "SELECT * FROM candidates WHERE {CANDIDATE_FILTER} ORDER BY created_at DESC, id DESC"
        );
        let candidates = sqlx::query_as::<_, Candidate>(&sql)
            .bind(search_pattern(filter))
            .fetch_all(&self.pool)
            .await?;
        Ok(candidates)
    }

    async fn insert(&self, input: NewCandidate) -> Result<Candidate, AppError> {
        let candidate = sqlx::query_as::<_, Candidate>(
            "INSERT INTO candidates (full_name, email, phone, skills, position_detected, source, source_link) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&input.full_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.skills)
        .bind(&input.position_detected)
        .bind(&input.source)
        .bind(&input.source_link)
        .fetch_one(&self.pool)
        .await?;
        Ok(candidate)
    }

    async fn count(&self, filter: &CandidateFilter) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM candidates WHERE {CANDIDATE_FILTER}");
        let row: (i64,) = sqlx::query_as(&sql)
            .bind(search_pattern(filter))
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}

#[async_trait]
impl RecordStore<Job> for PgStore {
    async fn list(&self, filter: &JobFilter) -> Result<Vec<Job>, AppError> {
        let jobs = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE ($1::text IS NULL OR status = $1) ORDER BY created_at DESC, id DESC",
        )
        .bind(&filter.status)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn insert(&self, input: CreateJob) -> Result<Job, AppError> {
        let job = sqlx::query_as::<_, Job>(
            "INSERT INTO jobs (title, department, employment_type, modality, description, requirements, salary_range, status) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&input.title)
        .bind(&input.department)
        .bind(&input.employment_type)
        .bind(&input.modality)
        .bind(&input.description)
        .bind(&input.requirements)
        .bind(&input.salary_range)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    async fn count(&self, filter: &JobFilter) -> Result<i64, AppError> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM jobs WHERE ($1::text IS NULL OR status = $1)")
                .bind(&filter.status)
                .fetch_one(&self.pool)
                .await?;
        Ok(row.0)
    }
}
