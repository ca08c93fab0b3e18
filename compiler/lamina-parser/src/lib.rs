//! The Lamina parser. Sources are parsed with a [pest] grammar, and the
//! resulting parse tree is translated into an `l3` [Program].
pub mod error;
pub mod grammar;
mod translate;

use lamina_ir::l3::{Program, Term};
use lamina_pipeline::{
    dump::dump_ir,
    interface::{CompilerInterface, CompilerResult, CompilerStage},
    settings::{CompilerSettings, CompilerStageKind},
    workspace::Workspace,
};
use lamina_source::SourceId;
use lamina_utils::{
    stream::CompilerOutputStream,
    timing::{CellStageMetrics, HasMetrics, StageMetrics},
};
use pest::Parser as _;

use crate::{
    error::ParseResult,
    grammar::{LaminaGrammar, Rule},
    translate::PestTermBuilder,
};

/// Parse a complete `(l3 (params) body)` program.
pub fn parse_program(contents: &str) -> ParseResult<Program> {
    let mut pairs = LaminaGrammar::parse(Rule::program, contents)?;
    let program = pairs.next().expect("`program` rule always produces a pair");

    PestTermBuilder.transform_program(program)
}

/// Parse a single term, without the surrounding program form.
pub fn parse_term(contents: &str) -> ParseResult<Term> {
    let mut pairs = LaminaGrammar::parse(Rule::standalone_term, contents)?;
    let term = pairs.next().expect("`standalone_term` rule always produces a pair");

    PestTermBuilder.transform_standalone_term(term)
}

/// The Lamina parsing compiler stage.
#[derive(Default)]
pub struct Parser {
    /// The metrics of the parsing stage.
    metrics: CellStageMetrics,
}

impl HasMetrics for Parser {
    fn metrics(&self) -> &CellStageMetrics {
        &self.metrics
    }
}

/// All of the information that is required from the compiler state for the
/// parsing stage to operate.
pub struct ParserCtx<'env> {
    /// The workspace, which holds the source to parse and receives the
    /// parsed program.
    pub workspace: &'env mut Workspace,

    /// The user-given settings.
    pub settings: &'env CompilerSettings,

    /// Where to write the parsed program, if requested.
    pub output_stream: CompilerOutputStream,
}

pub trait ParserCtxQuery: CompilerInterface {
    fn data(&mut self) -> ParserCtx<'_>;
}

impl<Ctx: ParserCtxQuery> CompilerStage<Ctx> for Parser {
    fn kind(&self) -> CompilerStageKind {
        CompilerStageKind::Parse
    }

    fn run(&mut self, entry_point: SourceId, ctx: &mut Ctx) -> CompilerResult<()> {
        let ParserCtx { workspace, .. } = ctx.data();
        let contents = workspace.source_map().contents(entry_point);

        let program = self
            .time_item("parse", |_| parse_program(contents))
            .map_err(|error| vec![error.into_report(entry_point)])?;

        log::debug!("parsed {} with {} parameter(s)", entry_point, program.parameters.len());
        workspace.set_program(entry_point, program);

        Ok(())
    }

    fn cleanup(&mut self, entry_point: SourceId, ctx: &mut Ctx) {
        let ParserCtx { workspace, settings, mut output_stream } = ctx.data();

        if settings.output_stage_results {
            if let Some(program) = workspace.program(entry_point) {
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
