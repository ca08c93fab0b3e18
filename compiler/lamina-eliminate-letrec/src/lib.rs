//! Elimination of recursive bindings, lowering `l3` programs into `l2`.
//!
//! This stage must only run on programs that passed scope checking, the
//! pipeline guarantees this by stopping at the first stage that reports an
//! error.
pub mod eliminate;
pub mod fresh;

use lamina_pipeline::{
    dump::dump_ir,
    interface::{CompilerInterface, CompilerResult, CompilerStage},
    settings::{CompilerSettings, CompilerStageKind},
    workspace::Workspace,
};
use lamina_reporting::report::{Report, ReportKind};
use lamina_source::SourceId;
use lamina_utils::{
    stream::CompilerOutputStream,
    timing::{CellStageMetrics, HasMetrics, StageMetrics},
};

pub use crate::eliminate::{
    Binding, Context, LetrecEliminator, eliminate_letrec_program, eliminate_letrec_term,
};

/// The Lamina recursive binding elimination compiler stage.
#[derive(Default)]
pub struct EliminateLetrec {
    /// The metrics of the elimination stage.
    metrics: CellStageMetrics,
}

impl HasMetrics for EliminateLetrec {
    fn metrics(&self) -> &CellStageMetrics {
        &self.metrics
    }
}

/// All of the information that is required from the compiler state for the
/// elimination stage to operate.
pub struct EliminateLetrecCtx<'env> {
    /// The workspace, which holds the checked `l3` program and receives the
    /// lowered `l2` program.
    pub workspace: &'env mut Workspace,

    /// The user-given settings.
    pub settings: &'env CompilerSettings,

    /// Where to write the lowered program, if requested.
    pub output_stream: CompilerOutputStream,
}

pub trait EliminateLetrecCtxQuery: CompilerInterface {
    fn data(&mut self) -> EliminateLetrecCtx<'_>;
}

impl<Ctx: EliminateLetrecCtxQuery> CompilerStage<Ctx> for EliminateLetrec {
    fn kind(&self) -> CompilerStageKind {
        CompilerStageKind::EliminateLetrec
    }

    fn run(&mut self, entry_point: SourceId, ctx: &mut Ctx) -> CompilerResult<()> {
        let EliminateLetrecCtx { workspace, .. } = ctx.data();

        let Some(program) = workspace.program(entry_point) else {
            let mut report = Report::new();
            report
                .kind(ReportKind::Internal)
                .title(format!("no program was parsed for {entry_point}"))
                .in_source(entry_point);
            return Err(vec![report]);
        };

        let mut eliminator = LetrecEliminator::new();
        let lowered = self.time_item("eliminate", |_| eliminator.eliminate_program(program));

        log::debug!(
            "eliminated {} letrec group(s), introducing {} cell(s)",
            eliminator.eliminated_groups(),
            eliminator.introduced_cells()
        );

        workspace.set_lowered_program(entry_point, lowered);
        Ok(())
    }

    fn cleanup(&mut self, entry_point: SourceId, ctx: &mut Ctx) {
        let EliminateLetrecCtx { workspace, settings, mut output_stream } = ctx.data();

        if settings.output_stage_results {
            if let Some(program) = workspace.lowered_program(entry_point) {
                dump_ir(&mut output_stream, settings.dump_mode, program);
            }
        }
    }

    fn metrics(&self) -> StageMetrics {
        self.metrics.clone().into()
    }

    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}
