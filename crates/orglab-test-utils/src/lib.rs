//! Testing utilities for the ORGLAB workspace
//!
//! Shared fixtures: sample org trees, fragment builders, and a scripted
//! analysis service that replays a fixed fragment sequence.

#![allow(missing_docs)]

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use orglab_model::{Kpi, NodeId, OrgNode};
use orglab_report::{
    AnalysisError, AnalysisService, CancelSignal, FragmentStream, ReportFragment,
};
use parking_lot::Mutex;
use std::time::Duration;

/// The default tree a fresh editing session starts from
pub fn initial_tree() -> OrgNode {
    let mut root = OrgNode::new("Leadership", "GENERAL DIRECTOR", "Strategic direction and vision.");
    root.id = NodeId::from("root-ceo");
    root.kpis.push(Kpi::new("Growth", 0.0, 100.0, "%"));
    root
}

/// A three-level tree with stable ids for addressing nodes in tests
pub fn sample_tree() -> OrgNode {
    let mut root = initial_tree();

    let mut sales = OrgNode::new("Sales", "CRO", "Revenue generation.");
    sales.id = NodeId::from("sales");
    let mut eng = OrgNode::new("Engineering", "CTO", "Product delivery.");
    eng.id = NodeId::from("eng");
    let mut platform = OrgNode::new("Platform", "Team Lead", "Infrastructure.");
    platform.id = NodeId::from("platform");

    eng.children.push(platform);
    root.children.push(sales);
    root.children.push(eng);
    root
}

pub fn fragment_summary(text: &str) -> ReportFragment {
    ReportFragment {
        executive_summary: Some(text.to_string()),
        ..ReportFragment::default()
    }
}

pub fn fragment_bottlenecks(items: &[&str]) -> ReportFragment {
    ReportFragment {
        current_bottlenecks: Some(items.iter().map(ToString::to_string).collect()),
        ..ReportFragment::default()
    }
}

pub fn fragment_roi(text: &str) -> ReportFragment {
    ReportFragment {
        roi_estimate: Some(text.to_string()),
        ..ReportFragment::default()
    }
}

/// A realistic complete fragment sequence: advisory sections first, the
/// executive summary last
pub fn full_script() -> Vec<Result<ReportFragment, AnalysisError>> {
    vec![
        Ok(fragment_bottlenecks(&["manual handoffs", "single-threaded approvals"])),
        Ok(ReportFragment {
            ai_first_vision: Some("Automate the approval chain end to end.".to_string()),
            ..ReportFragment::default()
        }),
        Ok(fragment_roi("3.2x within two quarters")),
        Ok(fragment_summary("Flatten the hierarchy and automate approvals.")),
    ]
}

/// Analysis service that replays a scripted fragment sequence
///
/// Non-restartable, like the real boundary: a second `analyze` call fails
/// with `ServiceUnavailable`. An optional per-fragment delay makes the
/// stream actually suspend between items.
#[derive(Debug)]
pub struct ScriptedAnalysisService {
    script: Mutex<Option<Vec<Result<ReportFragment, AnalysisError>>>>,
    delay: Option<Duration>,
}

impl ScriptedAnalysisService {
    pub fn new(script: Vec<Result<ReportFragment, AnalysisError>>) -> Self {
        Self {
            script: Mutex::new(Some(script)),
            delay: None,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Service whose stream fails after yielding `prefix` fragments
    pub fn failing_after(mut prefix: Vec<Result<ReportFragment, AnalysisError>>) -> Self {
        prefix.push(Err(AnalysisError::Transport("connection reset".to_string())));
        Self::new(prefix)
    }
}

#[async_trait]
impl AnalysisService for ScriptedAnalysisService {
    async fn analyze(
        &self,
        _tree: &OrgNode,
        _cancel: CancelSignal,
    ) -> Result<FragmentStream, AnalysisError> {
        let script = self
            .script
            .lock()
            .take()
            .ok_or_else(|| AnalysisError::ServiceUnavailable("script already consumed".to_string()))?;
        let delay = self.delay;
        let stream = stream::iter(script).then(move |item| async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            item
        });
        Ok(stream.boxed())
    }
}
