//! Dossier request records and the persisted ledger
//!
//! A request is created when a user asks to unlock a full report. It
//! snapshots the (possibly partial) report, gets a random access code, and
//! waits in the ledger; status changes are admin-driven and only ever move
//! forward.

use crate::error::GatingError;
use orglab_report::AnalysisReport;
use orglab_store::{KeyValueStore, Slot};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Persisted slot holding the full request list
pub const REQUESTS: Slot<Vec<DossierRequest>> = Slot::new("orglab.requests");

/// Lifecycle of a dossier request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    /// Created, waiting for the user to pay
    PendingPayment,
    /// Paid, waiting for admin approval
    AwaitingApproval,
    /// Approved; dossier released
    Approved,
}

impl RequestStatus {
    fn rank(self) -> u8 {
        match self {
            Self::PendingPayment => 0,
            Self::AwaitingApproval => 1,
            Self::Approved => 2,
        }
    }

    /// Whether `self -> to` is a legal (strictly forward) transition
    #[inline]
    #[must_use]
    pub fn can_transition_to(self, to: Self) -> bool {
        to.rank() > self.rank()
    }
}

/// One persisted unlock request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierRequest {
    /// Random identifier
    pub id: String,
    /// 4-digit numeric code the user quotes to the admin
    pub access_code: String,
    /// Creation time, epoch milliseconds
    pub timestamp: i64,
    /// Requester name
    pub user_name: String,
    /// Requester email
    pub user_email: String,
    /// Requester company
    pub company_name: String,
    /// Snapshot of the report at request time, possibly partial
    pub report: AnalysisReport,
    /// Lifecycle status
    pub status: RequestStatus,
}

/// Returned to the caller for display after creating a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestReceipt {
    /// Request id
    pub id: String,
    /// Access code to quote
    pub access_code: String,
}

/// Persisted ledger of dossier requests
///
/// Reads and rewrites the whole list per operation; concurrent writers race
/// with last-writer-wins, accepted for single-user intent.
#[derive(Debug, Clone)]
pub struct RequestLedger {
    store: Arc<dyn KeyValueStore>,
}

impl RequestLedger {
    /// Ledger backed by `store`
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Create a request in `PENDING_PAYMENT` and append it to the list
    ///
    /// Snapshots `report` as-is; a partial report is a valid snapshot.
    pub fn create_request(
        &self,
        user_name: impl Into<String>,
        user_email: impl Into<String>,
        company_name: impl Into<String>,
        report: AnalysisReport,
    ) -> RequestReceipt {
        let request = DossierRequest {
            id: Uuid::new_v4().to_string(),
            access_code: rand::rng().random_range(1000..10_000).to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            user_name: user_name.into(),
            user_email: user_email.into(),
            company_name: company_name.into(),
            report,
            status: RequestStatus::PendingPayment,
        };
        let receipt = RequestReceipt {
            id: request.id.clone(),
            access_code: request.access_code.clone(),
        };

        let mut requests = self.list();
        requests.push(request);
        REQUESTS.save(self.store.as_ref(), &requests);
        tracing::info!(id = %receipt.id, "dossier request created");
        receipt
    }

    /// All persisted requests, oldest first
    #[must_use]
    pub fn list(&self) -> Vec<DossierRequest> {
        REQUESTS.load_or_default(self.store.as_ref())
    }

    /// Look up one request by id
    #[must_use]
    pub fn find(&self, id: &str) -> Option<DossierRequest> {
        self.list().into_iter().find(|r| r.id == id)
    }

    /// Admin-only: advance a request's status
    pub fn set_status(&self, id: &str, to: RequestStatus) -> Result<(), GatingError> {
        let mut requests = self.list();
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| GatingError::RequestNotFound(id.to_string()))?;
        if !request.status.can_transition_to(to) {
            return Err(GatingError::IllegalStatusTransition {
                from: request.status,
                to,
            });
        }
        tracing::info!(id, from = ?request.status, ?to, "request status advanced");
        request.status = to;
        REQUESTS.save(self.store.as_ref(), &requests);
        Ok(())
    }
}
