pub mod aggregator;
pub mod config;
pub mod db;
pub mod documents;
pub mod error;
pub mod models;
pub mod portals;
pub mod routes;
pub mod store;

pub use aggregator::{Aggregator, SearchOutcome};
pub use documents::{CandidateProfile, ExtractionError, PdfTextExtractor, TextExtractor};
pub use error::AppError;
pub use portals::{ListingRecord, Portal, SiteAdapter, SourceError};
