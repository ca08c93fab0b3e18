//! Lamina compiler pipeline traits. This file contains the interfaces that
//! the pipeline uses to run the various stages that transform a source into
//! lower level IR.

use lamina_reporting::report::Report;
use lamina_source::SourceId;
use lamina_utils::{stream::CompilerOutputStream, timing::StageMetrics};

use crate::{
    settings::{CompilerSettings, CompilerStageKind},
    workspace::Workspace,
};

pub type CompilerResult<T> = Result<T, Vec<Report>>;

/// An abstract stage within the compiler pipeline. Each stage has an
/// associated [CompilerStageKind] which is used by the pipeline to decide
/// which stages to run.
pub trait CompilerStage<StageCtx> {
    /// Run the stage on the source `entry_point`.
    fn run(&mut self, entry_point: SourceId, stage_data: &mut StageCtx) -> CompilerResult<()>;

    /// Invoked after the stage completes successfully. Stages use this to
    /// emit their result when `--output-stage-results` is specified.
    fn cleanup(&mut self, _entry_point: SourceId, _stage_data: &mut StageCtx) {}

    /// Any metrics that the stage collected during its execution.
    ///
    /// By default, there are no collected metrics.
    fn metrics(&self) -> StageMetrics {
        StageMetrics::default()
    }

    /// "Reset" any collected metrics so that the stage can run again.
    fn reset_metrics(&mut self) {}

    /// The kind of this [CompilerStage].
    fn kind(&self) -> CompilerStageKind;
}

/// The interface between the compiler session and the [CompilerStage]s
/// within the pipeline. Stages never see the session itself, they select
/// what they need through their own query trait built on this one.
pub trait CompilerInterface {
    /// Get the error [CompilerOutputStream].
    fn error_stream(&self) -> CompilerOutputStream;

    /// Get the output [CompilerOutputStream].
    fn output_stream(&self) -> CompilerOutputStream;

    /// Get the [CompilerSettings].
    fn settings(&self) -> &CompilerSettings;

    /// Get a mutable reference to the current [CompilerSettings].
    fn settings_mut(&mut self) -> &mut CompilerSettings;

    /// Check if the session has accumulated any errors.
    fn has_errors(&self) -> bool {
        self.diagnostics().iter().any(|report| report.is_error())
    }

    /// Get the current [Report]s that have been collected by the compiler.
    fn diagnostics(&self) -> &[Report];

    /// Get a mutable reference to the collected [Report]s.
    fn diagnostics_mut(&mut self) -> &mut Vec<Report>;

    /// Get the current [Workspace].
    fn workspace(&self) -> &Workspace;

    /// Get a mutable reference to the current [Workspace].
    fn workspace_mut(&mut self) -> &mut Workspace;
}
