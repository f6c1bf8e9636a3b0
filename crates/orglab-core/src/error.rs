//! Aggregated core error type

use crate::state::StateError;
use orglab_gating::GatingError;
use orglab_model::TreeError;
use orglab_report::AnalysisError;
use orglab_store::StoreError;

/// Main application error
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Tree edit failed
    #[error("tree edit failed: {0}")]
    Tree(#[from] TreeError),

    /// Analysis boundary failed
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    /// Request ledger operation failed
    #[error("gating failed: {0}")]
    Gating(#[from] GatingError),

    /// Illegal app-state transition
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// Persistent store could not be opened
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A second analysis was started while one is in flight
    #[error("an analysis is already running")]
    AnalysisAlreadyRunning,
}
