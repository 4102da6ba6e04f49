use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors from the outbound datastore calls.
///
/// No variant is retried anywhere: every error is terminal for the current
/// request cycle, and the caller decides how to surface it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The datastore answered with a non-success status. The JSON error
    /// payload it sent back is preserved verbatim so handlers can relay it.
    #[error("Datastore rejected the request: status {status}")]
    Rejected {
        status: u16,
        details: serde_json::Value,
    },

    /// The datastore answered 2xx but the body was not the representation
    /// we asked for (e.g. an empty array from an insert).
    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    #[error("Insecure base URL: HTTPS required (except localhost for testing)")]
    InsecureBaseUrl,

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

// ============================================================================
// Records
// ============================================================================

/// One row of the `policies` table, as the datastore stores and echoes it.
///
/// The `id` is assigned by the database; this application never generates,
/// updates, or deletes one. `date` is the sort key for listings. The text
/// columns are nullable datastore-side, so they deserialize to `None` when
/// null or missing — one sparse row must not fail the whole listing fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub id: i64,
    pub title: Option<String>,
    pub date: NaiveDate,
    pub category: Option<String>,
    pub region: Option<String>,
    pub content: Option<String>,
    pub link: Option<String>,
}

/// A policy record about to be inserted — everything but the
/// database-assigned `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPolicy {
    pub title: String,
    pub date: NaiveDate,
    pub category: String,
    pub region: String,
    pub content: String,
    pub link: Option<String>,
}

impl NewPolicy {
    /// The fixed placeholder record the update endpoint appends on every
    /// invocation. Only the date varies; the rest is static sample content
    /// standing in for a real acquisition pipeline that was never written.
    pub fn sample(date: NaiveDate) -> Self {
        Self {
            title: "Sample policy entry".to_string(),
            date,
            category: "Sample".to_string(),
            region: "Nationwide".to_string(),
            content: "This is a sample policy record used to demonstrate the update endpoint."
                .to_string(),
            link: Some("https://example.com".to_string()),
        }
    }
}
