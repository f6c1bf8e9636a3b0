//! Top-level application state machine
//!
//! Exactly one state is active at a time; there are no concurrent states.
//! Illegal transitions are errors in release builds; the `strict-debug`
//! feature turns them into panics for test runs that want to catch them
//! loudly.

/// The screens the application can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Marketing landing page
    Landing,
    /// Org tree editor
    Editing,
    /// Analysis in flight, processing view
    Analyzing,
    /// Completed (or partially streamed) report on screen
    ViewingReport,
    /// Plans and checkout redirect
    Pricing,
    /// Admin dashboard over the request ledger
    AdminPanel,
}

/// State machine errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// The requested transition is not in the allowed table
    #[error("illegal app-state transition: {from:?} -> {to:?}")]
    IllegalTransition {
        /// State we were in
        from: AppState,
        /// State that was requested
        to: AppState,
    },
}

/// States reachable from `from` in one step
#[must_use]
pub fn allowed_transitions(from: AppState) -> Vec<AppState> {
    use AppState::*;
    match from {
        Landing => vec![Editing, Pricing],
        Editing => vec![Landing, Analyzing, Pricing, AdminPanel],
        // Cancel returns to the editor, completion shows the report.
        Analyzing => vec![Editing, ViewingReport],
        ViewingReport => vec![Editing, Pricing, AdminPanel],
        Pricing => vec![Landing, Editing],
        AdminPanel => vec![Editing, ViewingReport],
    }
}

/// Validate a transition against the allowed table
pub fn validate_transition(from: AppState, to: AppState) -> Result<(), StateError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        #[cfg(feature = "strict-debug")]
        panic!("illegal app-state transition attempted: {from:?} -> {to:?}");

        Err(StateError::IllegalTransition { from, to })
    }
}
