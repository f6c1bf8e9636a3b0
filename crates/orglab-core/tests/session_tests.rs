use orglab_core::{AppState, CoreError, Session, SessionConfig};
use orglab_model::NodeId;
use orglab_report::{AnalysisError, AssemblyOutcome};
use orglab_store::{slots, KeyValueStore, MemoryStore};
use orglab_test_utils::{full_script, initial_tree, sample_tree, ScriptedAnalysisService};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

const SECRET: &str = "TEST_SECRET";

fn session_with(
    store: Arc<dyn KeyValueStore>,
    service: ScriptedAnalysisService,
) -> Session {
    Session::new(
        SessionConfig::new("https://pay.example.com/x", SECRET),
        store,
        Arc::new(service),
        sample_tree(),
    )
}

fn locked_session(service: ScriptedAnalysisService) -> Session {
    session_with(Arc::new(MemoryStore::new()), service)
}

#[tokio::test]
async fn analysis_lifecycle_completes_on_report_view() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut session = session_with(Arc::clone(&store), ScriptedAnalysisService::new(full_script()));

    session.goto(AppState::Editing).unwrap();
    assert!(session.current_report().is_none());

    session.start_analysis().unwrap();
    assert_eq!(session.state(), AppState::Analyzing);
    // The tree pending analysis is saved for resume-after-payment.
    assert_eq!(slots::PENDING_TREE.load(store.as_ref()), Some(sample_tree()));

    let outcome = session.await_analysis().await;
    assert_eq!(outcome, Some(AssemblyOutcome::Completed));
    assert_eq!(session.state(), AppState::ViewingReport);

    let report = session.current_report().unwrap();
    assert!(report.is_complete());
    assert_eq!(report.roi_estimate.as_deref(), Some("3.2x within two quarters"));
}

#[tokio::test]
async fn overlay_follows_streaming_and_unlock_state() {
    let mut session = locked_session(
        ScriptedAnalysisService::new(full_script()).with_delay(Duration::from_millis(10)),
    );
    session.goto(AppState::Editing).unwrap();

    // No report yet: nothing to gate.
    assert!(!session.overlay_visible());

    session.start_analysis().unwrap();
    let mut watch = session.report_watch().unwrap();
    watch.changed().await.unwrap();
    // Report exists but streaming is active: still no overlay.
    assert!(session.current_report().is_some());
    assert!(!session.overlay_visible());

    session.await_analysis().await.unwrap();
    // Report present, streaming finished, locked profile: overlay.
    assert!(session.overlay_visible());
}

#[tokio::test]
async fn unlocked_profile_never_sees_the_overlay() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    slots::PREMIUM_UNLOCKED.save(store.as_ref(), &true);

    let mut session = session_with(store, ScriptedAnalysisService::new(full_script()));
    session.goto(AppState::Editing).unwrap();
    assert!(!session.overlay_visible());

    session.start_analysis().unwrap();
    session.await_analysis().await.unwrap();
    assert!(session.current_report().is_some());
    assert!(!session.overlay_visible());
}

#[tokio::test]
async fn unlock_round_trip_restores_pending_tree() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let pending = sample_tree().with_renamed(&NodeId::from("sales"), "Growth").unwrap();
    slots::PENDING_TREE.save(store.as_ref(), &pending);

    let mut session = session_with(Arc::clone(&store), ScriptedAnalysisService::new(vec![]));
    assert_eq!(session.state(), AppState::Landing);

    let outcome = session.on_load(&format!("status=success&token={SECRET}"));
    assert!(outcome.unlocked);
    assert!(outcome.strip_query);
    assert!(session.is_unlocked());
    assert_eq!(session.state(), AppState::Editing);
    assert_eq!(session.tree(), &pending);
}

#[tokio::test]
async fn wrong_token_changes_no_state() {
    let mut session = locked_session(ScriptedAnalysisService::new(vec![]));
    let outcome = session.on_load("status=success&token=FORGED");

    assert!(!outcome.unlocked);
    assert!(!outcome.strip_query);
    assert!(!session.is_unlocked());
    assert_eq!(session.state(), AppState::Landing);
    assert_eq!(session.tree(), &sample_tree());
}

#[tokio::test]
async fn cancel_discards_aggregate_and_returns_to_editor() {
    let mut session = locked_session(
        ScriptedAnalysisService::new(full_script()).with_delay(Duration::from_millis(20)),
    );
    session.goto(AppState::Editing).unwrap();
    session.start_analysis().unwrap();

    let mut watch = session.report_watch().unwrap();
    watch.changed().await.unwrap(); // empty aggregate published

    session.cancel_analysis();
    assert_eq!(session.state(), AppState::Editing);
    assert!(session.current_report().is_none());

    let outcome = session.await_analysis().await;
    assert_eq!(outcome, Some(AssemblyOutcome::Cancelled));
    assert!(!session.overlay_visible());
}

#[tokio::test]
async fn second_start_while_streaming_is_refused() {
    let mut session = locked_session(
        ScriptedAnalysisService::new(full_script()).with_delay(Duration::from_millis(50)),
    );
    session.goto(AppState::Editing).unwrap();
    session.start_analysis().unwrap();

    assert!(matches!(
        session.start_analysis(),
        Err(CoreError::AnalysisAlreadyRunning)
    ));
    session.cancel_analysis();
    session.await_analysis().await;
}

#[tokio::test]
async fn failed_stream_still_lands_on_report_view() {
    let mut session = locked_session(ScriptedAnalysisService::failing_after(vec![Ok(
        orglab_test_utils::fragment_roi("2x"),
    )]));
    session.goto(AppState::Editing).unwrap();
    session.start_analysis().unwrap();

    let outcome = session.await_analysis().await;
    assert_eq!(outcome, Some(AssemblyOutcome::Failed));
    assert_eq!(session.state(), AppState::ViewingReport);
    // Whatever merged before the fault stays visible.
    let report = session.current_report().unwrap();
    assert_eq!(report.roi_estimate.as_deref(), Some("2x"));
    assert!(!report.is_complete());
}

#[tokio::test]
async fn service_start_failure_is_a_failed_run() {
    let mut session = locked_session(ScriptedAnalysisService::new(vec![Err(
        AnalysisError::ServiceUnavailable("down".to_string()),
    )]));
    session.goto(AppState::Editing).unwrap();
    session.start_analysis().unwrap();

    assert_eq!(session.await_analysis().await, Some(AssemblyOutcome::Failed));
    // The empty aggregate was still published the instant analysis started.
    assert!(session.current_report().is_some());
}

#[tokio::test]
async fn dossier_request_snapshots_current_aggregate() {
    let mut session = locked_session(ScriptedAnalysisService::new(full_script()));
    session.goto(AppState::Editing).unwrap();
    session.start_analysis().unwrap();
    session.await_analysis().await.unwrap();

    let receipt = session.create_dossier_request("Ana", "a@x.com", "Acme");
    let stored = session.ledger().find(&receipt.id).unwrap();
    assert!(stored.report.is_complete());
    assert_eq!(stored.access_code.len(), 4);
}

#[tokio::test]
async fn tree_edits_go_through_the_session() {
    let mut session = locked_session(ScriptedAnalysisService::new(vec![]));
    session.goto(AppState::Editing).unwrap();

    session.set_user_position(&NodeId::from("eng")).unwrap();
    assert!(session.tree().find(&NodeId::from("eng")).unwrap().is_user_position);

    session.add_parent("Board", "COUNCIL", "Macro governance.");
    assert_eq!(session.tree().children.len(), 1);
    assert_eq!(session.tree().role, "COUNCIL");

    session
        .edit_tree(|tree| tree.with_renamed(&tree.id.clone(), "Holding"))
        .unwrap();
    assert_eq!(session.tree().name, "Holding");
}

#[tokio::test]
async fn admin_toggle_survives_a_new_session() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    {
        let mut session = session_with(Arc::clone(&store), ScriptedAnalysisService::new(vec![]));
        assert!(!session.is_admin_mode());
        assert!(session.toggle_admin_mode());
    }
    let session = session_with(store, ScriptedAnalysisService::new(vec![]));
    assert!(session.is_admin_mode());
}

#[tokio::test]
async fn reset_tree_forgets_pending_snapshot() {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let mut session = session_with(Arc::clone(&store), ScriptedAnalysisService::new(full_script()));
    session.goto(AppState::Editing).unwrap();
    session.start_analysis().unwrap();
    session.await_analysis().await.unwrap();
    assert!(slots::PENDING_TREE.load(store.as_ref()).is_some());

    session.reset_tree(initial_tree());
    assert!(slots::PENDING_TREE.load(store.as_ref()).is_none());
    assert_eq!(session.tree(), &initial_tree());
}
