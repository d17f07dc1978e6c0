//! Error types for report synthesis.

use thiserror::Error;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that abort a document build.
///
/// Missing optional data is never an error; the affected section is simply
/// omitted. Everything below is fatal for the document being built, and a
/// partial document is never emitted.
#[derive(Error, Debug)]
pub enum ReportError {
    /// An attachment job reported success but its payload is not the
    /// structured format the passthrough table promises. Upstream produced
    /// it, so corruption must surface instead of being masked.
    #[error("attachment job '{job_id}' produced malformed JSON: {source}")]
    MalformedAttachment {
        job_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// A job's effective category id has no entry in the category map. This
    /// is a defect in upstream category-override configuration.
    #[error("job '{job_id}' resolved to unknown category '{category_id}'")]
    UnresolvedCategory { job_id: String, category_id: String },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while persisting a document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
