use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Internal vacancy published by the recruiting team.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub department: Option<String>,
    pub employment_type: String,
    pub modality: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary_range: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub const STATUS_OPEN: &str = "open";
pub const STATUS_CLOSED: &str = "closed";

#[derive(Debug, Clone, Deserialize)]
pub struct CreateJob {
    pub title: String,
    pub department: Option<String>,
    #[serde(default = "default_employment_type")]
    pub employment_type: String,
    #[serde(default = "default_modality")]
    pub modality: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub salary_range: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
}

fn default_employment_type() -> String {
    "full-time".to_string()
}

fn default_modality() -> String {
    "on-site".to_string()
}

fn default_status() -> String {
    STATUS_OPEN.to_string()
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct JobFilter {
    pub status: Option<String>,
}

impl JobFilter {
    pub fn open() -> Self {
        Self {
            status: Some(STATUS_OPEN.to_string()),
        }
    }
}

impl CreateJob {
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Job title is required".to_string());
        }
        if self.status != STATUS_OPEN && self.status != STATUS_CLOSED {
            return Err(format!(
                "Invalid status '{}', expected '{STATUS_OPEN}' or '{STATUS_CLOSED}'",
                self.status
            ));
        }
        Ok(())
    }
}

impl Job {
    pub fn matches(&self, filter: &JobFilter) -> bool {
        filter
            .status
            .as_deref()
            .is_none_or(|status| self.status == status)
    }
}
