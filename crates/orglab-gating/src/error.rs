//! Gating errors

use crate::request::RequestStatus;

/// Errors from the dossier-request ledger
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatingError {
    /// No request with the given id exists
    #[error("request not found: {0}")]
    RequestNotFound(String),

    /// Request statuses only ever move forward
    #[error("illegal status transition: {from:?} -> {to:?}")]
    IllegalStatusTransition {
        /// Current status
        from: RequestStatus,
        /// Rejected target status
        to: RequestStatus,
    },
}
