//! Premium gating
//!
//! Decides whether a completed report renders fully or behind a lock
//! overlay, processes the payment-provider return redirect, and manages the
//! dossier-request ledger:
//! - [`policy`]: the pure overlay decision
//! - [`unlock`]: exactly-once bearer-token unlock on load
//! - [`request`]: dossier request records and their persisted ledger

pub mod error;
pub mod policy;
pub mod request;
pub mod unlock;

pub use error::GatingError;
pub use policy::overlay_visible;
pub use request::{DossierRequest, RequestLedger, RequestReceipt, RequestStatus};
pub use unlock::{PaymentReturn, UnlockGate, UnlockOutcome};
