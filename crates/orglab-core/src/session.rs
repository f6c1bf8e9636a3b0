//! Session controller
//!
//! Owns the application state, the tree being edited, the evolving report
//! aggregate, and the injected collaborators (store, analysis service). One
//! session per browser-profile equivalent; all methods run on the caller's
//! task, the only background activity is the spawned assembler.

use crate::config::SessionConfig;
use crate::error::CoreError;
use crate::state::{validate_transition, AppState};
use futures::stream::{self, StreamExt};
use orglab_gating::{RequestLedger, RequestReceipt, UnlockGate, UnlockOutcome};
use orglab_model::{NodeId, OrgNode, TreeError};
use orglab_report::{
    AnalysisReport, AnalysisService, AssemblyOutcome, CancelSignal, ReportAssembler, ReportWatch,
};
use orglab_store::{slots, KeyValueStore};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// The top-level application controller
pub struct Session {
    config: SessionConfig,
    store: Arc<dyn KeyValueStore>,
    service: Arc<dyn AnalysisService>,
    gate: UnlockGate,
    ledger: RequestLedger,
    state: AppState,
    tree: OrgNode,
    report: Option<ReportWatch>,
    cancel: Option<CancelSignal>,
    task: Option<JoinHandle<AssemblyOutcome>>,
    admin_mode: bool,
}

impl Session {
    /// New session on the landing screen
    ///
    /// The admin-mode toggle is restored from the store; everything else
    /// starts fresh.
    #[must_use]
    pub fn new(
        config: SessionConfig,
        store: Arc<dyn KeyValueStore>,
        service: Arc<dyn AnalysisService>,
        initial_tree: OrgNode,
    ) -> Self {
        let gate = UnlockGate::new(config.secret_token.clone());
        let ledger = RequestLedger::new(Arc::clone(&store));
        let admin_mode = slots::ADMIN_MODE.load_or_default(store.as_ref());
        Self {
            config,
            store,
            service,
            gate,
            ledger,
            state: AppState::Landing,
            tree: initial_tree,
            report: None,
            cancel: None,
            task: None,
            admin_mode,
        }
    }

    /// Current application state
    #[inline]
    #[must_use]
    pub fn state(&self) -> AppState {
        self.state
    }

    /// The tree being edited
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &OrgNode {
        &self.tree
    }

    /// External checkout page for the pricing view
    #[inline]
    #[must_use]
    pub fn checkout_url(&self) -> &str {
        &self.config.checkout_url
    }

    /// Whether the admin dashboard is reachable
    #[inline]
    #[must_use]
    pub fn is_admin_mode(&self) -> bool {
        self.admin_mode
    }

    /// The persisted request ledger, for the admin view
    #[inline]
    #[must_use]
    pub fn ledger(&self) -> &RequestLedger {
        &self.ledger
    }

    /// Switch screens; the transition must be in the allowed table
    pub fn goto(&mut self, to: AppState) -> Result<(), CoreError> {
        validate_transition(self.state, to)?;
        tracing::info!(from = ?self.state, ?to, "app state transition");
        self.state = to;
        Ok(())
    }

    /// Process the entry URL's query string, exactly once on load
    ///
    /// A valid payment return unlocks the profile and, when a pending tree
    /// was saved before the checkout redirect, restores it and jumps
    /// straight back into editing.
    pub fn on_load(&mut self, query: &str) -> UnlockOutcome {
        let outcome = self.gate.process_return(self.store.as_ref(), query);
        if let Some(tree) = outcome.restored_tree.clone() {
            self.tree = tree;
            self.state = AppState::Editing;
        }
        outcome
    }

    /// Start analyzing the current tree
    ///
    /// Persists the tree as pending (so a payment round-trip can resume
    /// it), publishes an empty aggregate immediately, and spawns the
    /// assembler. Fails if an analysis is already in flight or the current
    /// screen cannot enter analysis.
    pub fn start_analysis(&mut self) -> Result<(), CoreError> {
        if self.is_streaming() {
            return Err(CoreError::AnalysisAlreadyRunning);
        }
        self.goto(AppState::Analyzing)?;

        slots::PENDING_TREE.save(self.store.as_ref(), &self.tree);

        let cancel = CancelSignal::new();
        let (assembler, watch) = ReportAssembler::new();
        self.report = Some(watch);
        self.cancel = Some(cancel.clone());

        let service = Arc::clone(&self.service);
        let tree = self.tree.clone();
        self.task = Some(tokio::spawn(async move {
            match service.analyze(&tree, cancel.clone()).await {
                Ok(fragments) => assembler.run(fragments, cancel).await,
                // Still run the assembler so the empty aggregate and the
                // "finished" signal are published the same way.
                Err(err) => {
                    let failed = stream::once(async move { Err(err) }).boxed();
                    assembler.run(failed, cancel).await
                }
            }
        }));
        Ok(())
    }

    /// Request cancellation and discard the aggregate
    ///
    /// The assembler stops at its next suspension point; a fragment already
    /// delivered may still be merged first, which is fine because the
    /// aggregate is dropped here anyway.
    pub fn cancel_analysis(&mut self) {
        if let Some(cancel) = &self.cancel {
            cancel.cancel();
        }
        self.report = None;
        if self.state == AppState::Analyzing {
            self.state = AppState::Editing;
        }
    }

    /// Whether fragments may still arrive
    #[must_use]
    pub fn is_streaming(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Wait for the in-flight analysis to finish and settle the screen
    ///
    /// Completed and failed runs both land on the report view (whatever
    /// merged is what there is to show); a cancelled run returns to the
    /// editor. Returns `None` when no analysis was running.
    pub async fn await_analysis(&mut self) -> Option<AssemblyOutcome> {
        let task = self.task.take()?;
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "assembler task panicked");
                AssemblyOutcome::Failed
            }
        };
        self.cancel = None;
        if self.state == AppState::Analyzing {
            self.state = match outcome {
                AssemblyOutcome::Completed | AssemblyOutcome::Failed => AppState::ViewingReport,
                AssemblyOutcome::Cancelled => AppState::Editing,
            };
        }
        Some(outcome)
    }

    /// Latest merged aggregate, if an analysis has started
    #[must_use]
    pub fn current_report(&self) -> Option<AnalysisReport> {
        self.report.as_ref().and_then(|watch| watch.borrow().clone())
    }

    /// Watch handle for callers that render every intermediate merge
    #[must_use]
    pub fn report_watch(&self) -> Option<ReportWatch> {
        self.report.clone()
    }

    /// Whether the profile has been premium-unlocked
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.gate.is_unlocked(self.store.as_ref())
    }

    /// Whether the lock overlay covers the report right now
    #[must_use]
    pub fn overlay_visible(&self) -> bool {
        self.gate.overlay_visible(
            self.store.as_ref(),
            self.current_report().is_some(),
            !self.is_streaming(),
        )
    }

    /// Create a dossier request snapshotting the current aggregate
    pub fn create_dossier_request(
        &self,
        user_name: impl Into<String>,
        user_email: impl Into<String>,
        company_name: impl Into<String>,
    ) -> RequestReceipt {
        let snapshot = self.current_report().unwrap_or_default();
        self.ledger
            .create_request(user_name, user_email, company_name, snapshot)
    }

    /// Flip and persist the admin-mode toggle
    pub fn toggle_admin_mode(&mut self) -> bool {
        self.admin_mode = !self.admin_mode;
        slots::ADMIN_MODE.save(self.store.as_ref(), &self.admin_mode);
        self.admin_mode
    }

    /// Replace the tree and forget any pending analysis snapshot
    pub fn reset_tree(&mut self, tree: OrgNode) {
        self.tree = tree;
        slots::PENDING_TREE.clear(self.store.as_ref());
    }

    /// Apply a structural edit, swapping in the new tree on success
    pub fn edit_tree(
        &mut self,
        edit: impl FnOnce(&OrgNode) -> Result<OrgNode, TreeError>,
    ) -> Result<(), CoreError> {
        self.tree = edit(&self.tree)?;
        Ok(())
    }

    /// Mark the user's own position (tree-wide single select)
    pub fn set_user_position(&mut self, id: &NodeId) -> Result<(), CoreError> {
        self.edit_tree(|tree| tree.with_user_position(id))
    }

    /// Rotate a new root above the current one
    pub fn add_parent(
        &mut self,
        name: impl Into<String>,
        role: impl Into<String>,
        functions: impl Into<String>,
    ) {
        self.tree = self.tree.with_parent(name, role, functions);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("streaming", &self.is_streaming())
            .field("admin_mode", &self.admin_mode)
            .finish_non_exhaustive()
    }
}
