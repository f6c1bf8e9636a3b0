//! Sparse report fragments and the merge fold
//!
//! A fragment carries any subset of the report's sections. Merging is a
//! pure, total fold `(aggregate, fragment) -> aggregate`: present fragment
//! fields overwrite, absent fields leave the aggregate alone. Order of
//! arrival is significant (last write wins); there is no field-level
//! conflict detection.

use crate::error::AnalysisError;
use crate::report::{AiAgent, AnalysisReport, CrownGem, Dossier, ProposedOrgNode};
use serde::{Deserialize, Serialize};

/// One partial update delivered during streaming
///
/// Same shape as [`AnalysisReport`], but only ever read field-by-field by
/// the merge. Unknown wire fields are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFragment {
    /// See [`AnalysisReport::executive_summary`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executive_summary: Option<String>,
    /// See [`AnalysisReport::agent_critique`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_critique: Option<String>,
    /// See [`AnalysisReport::current_bottlenecks`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_bottlenecks: Option<Vec<String>>,
    /// See [`AnalysisReport::ai_first_vision`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_first_vision: Option<String>,
    /// See [`AnalysisReport::suggested_agents`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_agents: Option<Vec<AiAgent>>,
    /// See [`AnalysisReport::proposed_org_chart`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_org_chart: Option<ProposedOrgNode>,
    /// See [`AnalysisReport::new_workflow_description`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_workflow_description: Option<String>,
    /// See [`AnalysisReport::roi_estimate`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi_estimate: Option<String>,
    /// See [`AnalysisReport::career_innovation_strategy`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_innovation_strategy: Option<String>,
    /// See [`AnalysisReport::user_specific_strategy`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_specific_strategy: Option<String>,
    /// See [`AnalysisReport::full_dossier`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_dossier: Option<Dossier>,
    /// See [`AnalysisReport::crown_gems`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crown_gems: Option<Vec<CrownGem>>,
}

impl ReportFragment {
    /// Decode a fragment from the service's JSON wire shape
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when the fragment carries no sections at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

macro_rules! overwrite_present {
    ($agg:ident, $frag:ident, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $frag.$field.clone() {
                $agg.$field = Some(value);
            }
        )+
    };
}

impl AnalysisReport {
    /// Shallow last-write-wins merge of one fragment into the aggregate
    ///
    /// Pure and total: every input produces an aggregate, a repeated
    /// fragment is idempotent, and reordering fragments that touch the same
    /// field changes the result by design.
    #[must_use]
    pub fn merge(mut self, fragment: &ReportFragment) -> Self {
        self.apply(fragment);
        self
    }

    /// In-place form of [`merge`](Self::merge), for use behind a publisher
    pub fn apply(&mut self, fragment: &ReportFragment) {
        overwrite_present!(
            self,
            fragment,
            executive_summary,
            agent_critique,
            current_bottlenecks,
            ai_first_vision,
            suggested_agents,
            proposed_org_chart,
            new_workflow_description,
            roi_estimate,
            career_innovation_strategy,
            user_specific_strategy,
            full_dossier,
            crown_gems,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn summary(text: &str) -> ReportFragment {
        ReportFragment {
            executive_summary: Some(text.to_string()),
            ..ReportFragment::default()
        }
    }

    #[test]
    fn later_fragment_wins_for_same_field() {
        let f1 = summary("first");
        let f2 = summary("second");

        let forward = AnalysisReport::empty().merge(&f1).merge(&f2);
        let reverse = AnalysisReport::empty().merge(&f2).merge(&f1);

        assert_eq!(forward.executive_summary.as_deref(), Some("second"));
        assert_eq!(reverse.executive_summary.as_deref(), Some("first"));
        assert_ne!(forward, reverse);
    }

    #[test]
    fn absent_fields_leave_aggregate_untouched() {
        let base = AnalysisReport::empty().merge(&ReportFragment {
            roi_estimate: Some("3x".to_string()),
            ..ReportFragment::default()
        });
        let merged = base.clone().merge(&summary("s"));
        assert_eq!(merged.roi_estimate.as_deref(), Some("3x"));
        assert_eq!(merged.executive_summary.as_deref(), Some("s"));
    }

    #[test]
    fn re_merge_is_idempotent() {
        let frag = ReportFragment {
            executive_summary: Some("s".to_string()),
            current_bottlenecks: Some(vec!["handoffs".to_string()]),
            ..ReportFragment::default()
        };
        let once = AnalysisReport::empty().merge(&frag);
        let twice = once.clone().merge(&frag);
        assert_eq!(once, twice);
    }

    #[test]
    fn unknown_wire_fields_are_ignored() {
        let frag = ReportFragment::from_json(
            r#"{"executiveSummary": "s", "someFutureField": {"x": 1}}"#,
        )
        .unwrap();
        assert_eq!(frag.executive_summary.as_deref(), Some("s"));
    }

    #[test]
    fn empty_fragment_is_a_merge_identity() {
        let base = AnalysisReport::empty().merge(&summary("s"));
        assert_eq!(base.clone().merge(&ReportFragment::default()), base);
    }

    proptest! {
        #[test]
        fn merge_is_total_and_idempotent(a in ".*", b in ".*") {
            let frag = ReportFragment {
                executive_summary: Some(a),
                roi_estimate: Some(b),
                ..ReportFragment::default()
            };
            let once = AnalysisReport::empty().merge(&frag);
            prop_assert_eq!(once.clone().merge(&frag), once);
        }

        #[test]
        fn last_write_wins(a in ".*", b in ".*") {
            let merged = AnalysisReport::empty()
                .merge(&summary(&a))
                .merge(&summary(&b));
            prop_assert_eq!(merged.executive_summary, Some(b));
        }
    }
}
