//! Upstream record sources: one JSON API per drug, disease and target.

pub mod client;
pub mod record;
pub mod report;

pub use client::{ApiClient, FetchError, FetchOutcome, Role};
pub use record::{Record, UNKNOWN_ID};
pub use report::{CollectingReporter, ErrorReporter, TracingReporter};
