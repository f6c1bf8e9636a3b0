//! Stream consumer / report assembler
//!
//! Folds the fragment stream into the aggregate report and publishes every
//! intermediate state through a watch channel, so the caller can render a
//! processing view from the instant analysis starts.

use crate::cancel::CancelSignal;
use crate::fragment::ReportFragment;
use crate::report::AnalysisReport;
use crate::service::FragmentStream;
use futures::StreamExt;
use tokio::sync::watch;

/// How an assembly run ended
///
/// Callers only distinguish finished from not-finished; the variant detail
/// exists for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyOutcome {
    /// The service ended the stream normally
    Completed,
    /// Cancellation was observed at a suspension point
    Cancelled,
    /// The stream surfaced an error; the merged prefix stays visible
    Failed,
}

/// Read side of the evolving aggregate
///
/// `None` until an analysis has started; thereafter the latest merge result,
/// which survives cancellation and stream failure (discarding it is the
/// caller's decision).
pub type ReportWatch = watch::Receiver<Option<AnalysisReport>>;

/// Consumes one fragment stream into an aggregate report
#[derive(Debug)]
pub struct ReportAssembler {
    tx: watch::Sender<Option<AnalysisReport>>,
}

impl ReportAssembler {
    /// New assembler plus the watch handle the caller renders from
    #[must_use]
    pub fn new() -> (Self, ReportWatch) {
        let (tx, rx) = watch::channel(None);
        (Self { tx }, rx)
    }

    /// Run the consume loop to completion
    ///
    /// Publishes an empty aggregate immediately, then merges each delivered
    /// fragment unconditionally. Suspension happens only while awaiting the
    /// next fragment; that is also the only point where cancellation is
    /// observed, so a fragment that was already delivered is merged even if
    /// cancellation raced in just before. Merged state is never rolled back.
    pub async fn run(self, mut stream: FragmentStream, cancel: CancelSignal) -> AssemblyOutcome {
        self.tx.send_replace(Some(AnalysisReport::empty()));
        let mut merged = 0usize;

        loop {
            let next = tokio::select! {
                // Drain a fragment that is already available before looking
                // at the cancellation flag.
                biased;
                item = stream.next() => item,
                () = cancel.cancelled() => {
                    tracing::info!(merged, "analysis cancelled");
                    return AssemblyOutcome::Cancelled;
                }
            };

            match next {
                Some(Ok(fragment)) => {
                    merged += 1;
                    self.tx.send_modify(|agg| {
                        if let Some(report) = agg.as_mut() {
                            report.apply(&fragment);
                        }
                    });
                    tracing::debug!(merged, "fragment merged");
                }
                Some(Err(err)) => {
                    tracing::error!(merged, error = %err, "analysis stream failed");
                    return AssemblyOutcome::Failed;
                }
                None => {
                    tracing::info!(merged, "analysis stream completed");
                    return AssemblyOutcome::Completed;
                }
            }
        }
    }
}
