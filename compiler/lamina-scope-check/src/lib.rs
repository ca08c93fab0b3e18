//! This crate is responsible for checking the scoping of `l3` programs.
//!
//! Every reference must resolve to an enclosing binder, and no single binder
//! list may declare a name twice. Shadowing across nested scopes is allowed,
//! the innermost binder wins. Checking stops at the first violation, which is
//! the only one that is reported.
//!
//! The pass runs between parsing and recursive binding elimination, which
//! relies on every reference being bound.
pub mod check;
pub mod diagnostics;

use lamina_pipeline::{
    interface::{CompilerInterface, CompilerResult, CompilerStage},
    settings::CompilerStageKind,
    workspace::Workspace,
};
use lamina_reporting::{
    report::{Report, ReportKind},
    reporter::into_reports,
};
use lamina_source::SourceId;
use lamina_utils::timing::{CellStageMetrics, HasMetrics, StageMetrics};

pub use crate::check::{check, check_program, check_term};

/// The Lamina scope checking compiler stage.
#[derive(Default)]
pub struct ScopeCheck {
    /// The metrics of the scope checking stage.
    metrics: CellStageMetrics,
}

impl HasMetrics for ScopeCheck {
    fn metrics(&self) -> &CellStageMetrics {
        &self.metrics
    }
}

/// All of the information that is required from the compiler state for the
/// scope checking stage to operate.
pub struct ScopeCheckCtx<'env> {
    /// The workspace. This is used to retrieve the parsed program.
    pub workspace: &'env Workspace,
}

pub trait ScopeCheckCtxQuery: CompilerInterface {
    fn data(&mut self) -> ScopeCheckCtx<'_>;
}

impl<Ctx: ScopeCheckCtxQuery> CompilerStage<Ctx> for ScopeCheck {
    fn kind(&self) -> CompilerStageKind {
        CompilerStageKind::ScopeCheck
    }

    fn run(&mut self, entry_point: SourceId, ctx: &mut Ctx) -> CompilerResult<()> {
        let ScopeCheckCtx { workspace } = ctx.data();

        let Some(program) = workspace.program(entry_point) else {
            let mut report = Report::new();
            report
                .kind(ReportKind::Internal)
                .title(format!("no program was parsed for {entry_point}"))
                .in_source(entry_point);
            return Err(vec![report]);
        };

        self.time_item("check", |_| check_program(program)).map_err(|error| {
            let mut reports = into_reports(&error);
            for report in &mut reports {
                report.in_source(entry_point);
            }
            reports
        })?;

        log::debug!("{} is well scoped", workspace.source_map().path(entry_point).display());
        Ok(())
    }

    fn metrics(&self) -> StageMetrics {
        self.metrics.clone().into()
    }

    fn reset_metrics(&mut self) {
        self.metrics.reset();
    }
}
