// Portal module.
// Defines the adapter trait, the listing record every adapter produces and the
// declarative descriptor that drives the generic HTML adapter.

pub mod adapter;
pub mod empleos;
pub mod mifuturo;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use adapter::DescriptorAdapter;

/// Placeholder stored in `ListingRecord::company` when a portal gives no company.
pub const COMPANY_NOT_SPECIFIED: &str = "Not specified";

/// Link value used when a listing has no resolvable detail URL.
pub const UNRESOLVED_LINK: &str = "#";

/// External job portals with a registered descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Portal {
    Empleos,
    MiFuturo,
}

impl Portal {
    pub const ALL: [Portal; 2] = [Portal::Empleos, Portal::MiFuturo];

    /// Identifier used in query strings and error maps.
    pub fn slug(self) -> &'static str {
        match self {
            Portal::Empleos => "empleos",
            Portal::MiFuturo => "mifuturo",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Portal::Empleos => "Empleos.net",
            Portal::MiFuturo => "Mi Futuro Empleo",
        }
    }

    /// Descriptor pointing at the live portal.
    pub fn descriptor(self) -> PortalDescriptor {
        match self {
            Portal::Empleos => empleos::descriptor(empleos::BASE_URL),
            Portal::MiFuturo => mifuturo::descriptor(mifuturo::BASE_URL),
        }
    }
}

impl fmt::Display for Portal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported portal: {0}")]
pub struct UnknownPortal(pub String);

impl FromStr for Portal {
    type Err = UnknownPortal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empleos" => Ok(Portal::Empleos),
            "mifuturo" => Ok(Portal::MiFuturo),
            other => Err(UnknownPortal(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    External,
    /// Reserved for listings merged in from the local record store.
    Internal,
}

/// One job posting discovered on an external portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub title: String,
    pub link: String,
    pub company: String,
    pub source: Portal,
    pub kind: ListingKind,
}

/// Failure of a single adapter call. Never escalated past the aggregator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("{portal} request failed: {message}")]
    Fetch { portal: Portal, message: String },

    #[error("{portal} markup rules are invalid: {message}")]
    Parse { portal: Portal, message: String },

    #[error("{portal} did not respond within {after:?}")]
    Timeout { portal: Portal, after: Duration },
}

/// How the search term is placed into the portal URL.
#[derive(Debug, Clone)]
pub enum SearchRoute {
    /// `{base}{path}?{param}={encoded query}&{extra...}`
    QueryString {
        path: &'static str,
        param: &'static str,
        extra: &'static [(&'static str, &'static str)],
    },
    /// `{base}{prefix}{slug}` where slug is the lowercased, hyphenated query.
    PathSlug { prefix: &'static str },
}

/// Where the detail link of a listing lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSource {
    /// `href` of the element the title was read from.
    TitleElement,
    /// `href` of the listing container itself.
    Container,
}

/// Everything needed to scrape one portal. Adding a portal means adding one
/// of these; the fetch and parse control flow is shared.
#[derive(Debug, Clone)]
pub struct PortalDescriptor {
    pub portal: Portal,
    pub base_url: String,
    pub search: SearchRoute,
    pub user_agent: &'static str,
    pub listing_selector: &'static str,
    pub title_selectors: &'static [&'static str],
    pub link: LinkSource,
    pub company_selectors: &'static [&'static str],
}

/// Trait that all portal adapters implement.
#[async_trait]
pub trait SiteAdapter: Send + Sync {
    fn portal(&self) -> Portal;

    /// Fetch and normalize listings for a free-text query. One request, no retry.
    async fn fetch_listings(&self, query: &str) -> Result<Vec<ListingRecord>, SourceError>;
}
