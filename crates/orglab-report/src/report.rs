//! Report aggregate and section types
//!
//! All produced by the external analysis service, never user-edited. Serde
//! names follow the service's wire shape (`camelCase`, `HUMAN|AI_AGENT|HYBRID`
//! type tags). The aggregate is a flat bag of independent optional sections;
//! no cross-field invariant has to hold before streaming completes.

use serde::{Deserialize, Serialize};

/// Who (or what) fills a proposed position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentType {
    /// A person
    Human,
    /// A fully automated agent
    AiAgent,
    /// A person augmented by automation
    Hybrid,
}

/// Output-side mirror of an org node, annotated by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedOrgNode {
    /// Identifier assigned by the service
    pub id: String,
    /// Position name
    pub name: String,
    /// Role title
    pub role: String,
    /// Staffing classification for the redesigned position
    #[serde(rename = "type")]
    pub agent_type: AgentType,
    /// Responsibilities text
    pub functions: String,
    /// Advisory: how to modernize this position
    pub innovation_tip: String,
    /// Advisory: the single highest-leverage insight for this position
    pub crown_gem: String,
    /// Carried over from the input tree when the user marked a position
    #[serde(default)]
    pub is_user_position: bool,
    /// Proposed direct reports
    #[serde(default)]
    pub children: Vec<ProposedOrgNode>,
}

/// A concrete tool suggestion inside an agent recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolRecommendation {
    /// Tool name
    pub tool: String,
    /// Vendor or documentation link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Tool category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One suggested automation agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAgent {
    /// Agent name
    pub name: String,
    /// What the agent does
    pub description: String,
    /// Human tasks the agent absorbs
    #[serde(default)]
    pub replaced_tasks: Vec<String>,
    /// Claimed efficiency gain, free text
    pub efficiency_gain: String,
    /// Tools to build it with
    #[serde(default)]
    pub recommended_stack: Vec<ToolRecommendation>,
}

/// A sub-heading inside a dossier section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtopic {
    /// Heading
    pub title: String,
    /// Body text
    pub text: String,
}

/// One titled section of the extended dossier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DossierSection {
    /// Section title
    pub title: String,
    /// Section body
    pub content: String,
    /// Optional sub-headings
    #[serde(default)]
    pub subtopics: Vec<Subtopic>,
}

/// The extended, paid-tier portion of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dossier {
    /// Financial analysis
    pub financial_analysis: DossierSection,
    /// Rollout plan
    pub operational_roadmap: DossierSection,
    /// Recommended tooling
    pub tool_stack: DossierSection,
    /// Risks and mitigations
    pub risk_assessment: DossierSection,
}

/// A key insight surfaced by the analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrownGem {
    /// Insight title
    pub title: String,
    /// Insight body
    pub description: String,
    /// Expected impact, free text
    pub impact: String,
}

/// The accumulated analysis report
///
/// Partial until streaming completes: every section is optional and filled
/// in (or overwritten) as fragments arrive. "Complete" is inferred by the
/// presence of the executive summary; the assembler itself never validates
/// completeness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Executive summary; its presence marks the report renderable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executive_summary: Option<String>,
    /// Service's critique of the current structure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_critique: Option<String>,
    /// Current bottlenecks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_bottlenecks: Option<Vec<String>>,
    /// The automation-first vision statement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_first_vision: Option<String>,
    /// Suggested automation agents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_agents: Option<Vec<AiAgent>>,
    /// Redesigned org chart
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_org_chart: Option<ProposedOrgNode>,
    /// Narrative of the redesigned workflow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_workflow_description: Option<String>,
    /// Return-on-investment estimate, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi_estimate: Option<String>,
    /// Career strategy for the team
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_innovation_strategy: Option<String>,
    /// Strategy specific to the user's marked position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_specific_strategy: Option<String>,
    /// Extended paid-tier dossier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_dossier: Option<Dossier>,
    /// Key insights
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crown_gems: Option<Vec<CrownGem>>,
}

impl AnalysisReport {
    /// Empty aggregate, published the instant analysis starts
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether enough of the report has arrived to render it
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.executive_summary.is_some()
    }
}
