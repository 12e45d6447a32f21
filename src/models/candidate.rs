use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::documents::profile::UNKNOWN_CANDIDATE;
use crate::portals::ListingRecord;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Candidate {
    pub id: i32,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub position_detected: Option<String>,
    pub source: Option<String>,
    pub source_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A candidate confirmed by a human, ready for insertion.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCandidate {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub position_detected: Option<String>,
    pub source: Option<String>,
    pub source_link: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct CandidateFilter {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImportListing {
    pub listing: ListingRecord,
    pub full_name: Option<String>,
}

impl NewCandidate {
    /// Seed a lead from an external listing. Fields are copied; nothing links
    /// back to the listing.
    pub fn from_listing(listing: &ListingRecord, full_name: Option<String>) -> Self {
        Self {
            full_name: full_name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| UNKNOWN_CANDIDATE.to_string()),
            email: None,
            phone: None,
            skills: Vec::new(),
            position_detected: Some(listing.title.clone()),
            source: Some(listing.source.display_name().to_string()),
            source_link: Some(listing.link.clone()),
        }
    }

    /// Blank optional fields are stored as absent.
    pub fn normalized(mut self) -> Self {
        fn blank_to_none(value: Option<String>) -> Option<String> {
            value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        }
        self.full_name = self.full_name.trim().to_string();
        self.email = blank_to_none(self.email);
        self.phone = blank_to_none(self.phone);
        self.position_detected = blank_to_none(self.position_detected);
        self.source = blank_to_none(self.source);
        self.source_link = blank_to_none(self.source_link);
        self
    }
}

impl Candidate {
    /// Case-insensitive match on name, detected position or any skill.
    pub fn matches(&self, filter: &CandidateFilter) -> bool {
        let Some(term) = filter.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };
        let term = term.to_lowercase();
        let contains = |s: &str| s.to_lowercase().contains(&term);

        contains(self.full_name.as_str())
            || self.position_detected.as_deref().is_some_and(contains)
            || self.skills.iter().any(|s| contains(s.as_str()))
    }
}
