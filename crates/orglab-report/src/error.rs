//! Error types for the analysis stream

/// Errors surfaced by the analysis-service boundary
///
/// Any of these terminates the fragment stream; the already-merged prefix of
/// the aggregate stays visible to the caller.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The external service refused or failed to start the analysis
    #[error("analysis service unavailable: {0}")]
    ServiceUnavailable(String),

    /// A fragment arrived that could not be decoded
    #[error("malformed fragment: {0}")]
    MalformedFragment(#[from] serde_json::Error),

    /// The connection to the service dropped mid-stream
    #[error("transport failure: {0}")]
    Transport(String),

    /// The caller cancelled the analysis
    #[error("analysis cancelled")]
    Cancelled,
}
