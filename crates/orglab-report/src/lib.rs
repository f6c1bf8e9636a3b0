//! Streamed strategy-report assembly
//!
//! The analysis service emits a lazy, finite sequence of sparse report
//! fragments; this crate folds them into a single accumulating
//! [`AnalysisReport`]:
//! - [`report`]: the optional-field aggregate and its section types
//! - [`fragment`]: sparse fragment mirror and the pure last-write-wins merge
//! - [`cancel`]: cooperative cancellation handle
//! - [`service`]: the external analysis-service boundary trait
//! - [`assembler`]: the consume loop that merges fragments, honors
//!   cancellation at suspension points, and publishes the evolving aggregate

pub mod assembler;
pub mod cancel;
pub mod error;
pub mod fragment;
pub mod report;
pub mod service;

pub use assembler::{AssemblyOutcome, ReportAssembler, ReportWatch};
pub use cancel::CancelSignal;
pub use error::AnalysisError;
pub use fragment::ReportFragment;
pub use report::{
    AgentType, AiAgent, AnalysisReport, CrownGem, Dossier, DossierSection, ProposedOrgNode,
    Subtopic, ToolRecommendation,
};
pub use service::{AnalysisService, FragmentStream};
