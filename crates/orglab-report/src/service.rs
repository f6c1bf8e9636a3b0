//! External analysis-service boundary
//!
//! The core never sees how fragments are produced (model prompts, request
//! formatting); it consumes whatever stream an [`AnalysisService`]
//! implementation hands back.

use crate::cancel::CancelSignal;
use crate::error::AnalysisError;
use crate::fragment::ReportFragment;
use async_trait::async_trait;
use futures::stream::BoxStream;
use orglab_model::OrgNode;

/// Lazy, finite, non-restartable sequence of partial-report fragments
pub type FragmentStream = BoxStream<'static, Result<ReportFragment, AnalysisError>>;

/// The external strategic-analysis service
///
/// `analyze` is expected to honor `cancel` at its own network suspension
/// points; a fragment it has already yielded is past the point of no return
/// and will be merged by the consumer regardless.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Start an analysis of `tree`, returning the fragment stream
    async fn analyze(
        &self,
        tree: &OrgNode,
        cancel: CancelSignal,
    ) -> Result<FragmentStream, AnalysisError>;
}
