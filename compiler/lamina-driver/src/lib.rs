//! Defines the global Lamina compiler state. This is used to create a global
//! [Compiler] which holds all of the information that might be used by
//! multiple stages across the entire compiler pipeline.
//!
//! However, the [Compiler] is opaque to all of the stages within the
//! pipeline. Each [CompilerStage] provides a trait with methods for
//! "selecting" the information that is needed by the stage. This creates a
//! clear separation between the stages and the global state, keeping the
//! crate dependency graph clean.
pub mod driver;
mod metrics;

use driver::Driver;
use lamina_eliminate_letrec::{EliminateLetrec, EliminateLetrecCtx, EliminateLetrecCtxQuery};
use lamina_parser::{Parser, ParserCtx, ParserCtxQuery};
use lamina_pipeline::{
    interface::{CompilerInterface, CompilerStage},
    settings::CompilerSettings,
    workspace::Workspace,
};
use lamina_reporting::report::Report;
use lamina_scope_check::{ScopeCheck, ScopeCheckCtx, ScopeCheckCtxQuery};
use lamina_utils::stream::CompilerOutputStream;

/// A struct that is used to construct a [Compiler] with either a default or
/// a custom configuration.
pub struct CompilerBuilder;

impl CompilerBuilder {
    /// Create a new [Compiler] with the default stage configuration.
    pub fn build_with_settings(
        settings: CompilerSettings,
        error_stream: impl Fn() -> CompilerOutputStream + 'static,
        output_stream: impl Fn() -> CompilerOutputStream + 'static,
    ) -> Driver<Compiler> {
        Self::build_with_interface(Compiler::new(settings, error_stream, output_stream))
    }

    /// Create a new [Compiler] with a specified compiler interface that
    /// supports the [DefaultCtxQuery] trait, i.e. all of the stages within
    /// the standard pipeline.
    pub fn build_with_interface<I: CompilerInterface + DefaultCtxQuery>(interface: I) -> Driver<I> {
        Self::build(
            interface,
            vec![
                Box::<Parser>::default(),
                Box::<ScopeCheck>::default(),
                Box::<EliminateLetrec>::default(),
            ],
        )
    }

    /// Create a new [Compiler] with a custom configuration.
    pub fn build<I: CompilerInterface>(ctx: I, stages: Vec<Box<dyn CompilerStage<I>>>) -> Driver<I> {
        Driver::new(ctx, stages)
    }
}

/// The [Compiler] holds all the information and state of the compiler
/// instance.
pub struct Compiler {
    /// The collected workspace sources for the current job.
    pub workspace: Workspace,

    /// The stream to use for writing diagnostics to.
    pub error_stream: Box<dyn Fn() -> CompilerOutputStream>,

    /// The stream to use for writing output to.
    pub output_stream: Box<dyn Fn() -> CompilerOutputStream>,

    /// Any diagnostics that were collected from any stage.
    pub diagnostics: Vec<Report>,

    /// Compiler settings that are stored.
    pub settings: CompilerSettings,
}

impl Compiler {
    /// Create a new [Compiler].
    pub fn new(
        settings: CompilerSettings,
        error_stream: impl Fn() -> CompilerOutputStream + 'static,
        output_stream: impl Fn() -> CompilerOutputStream + 'static,
    ) -> Self {
        Self {
            workspace: Workspace::new(),
            error_stream: Box::new(error_stream),
            output_stream: Box::new(output_stream),
            diagnostics: Vec::new(),
            settings,
        }
    }
}

impl DefaultCtxQuery for Compiler {}

impl CompilerInterface for Compiler {
    fn error_stream(&self) -> CompilerOutputStream {
        (self.error_stream)()
    }

    fn output_stream(&self) -> CompilerOutputStream {
        (self.output_stream)()
    }

    fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut CompilerSettings {
        &mut self.settings
    }

    fn diagnostics(&self) -> &[Report] {
        &self.diagnostics
    }

    fn diagnostics_mut(&mut self) -> &mut Vec<Report> {
        &mut self.diagnostics
    }

    fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }
}

impl ParserCtxQuery for Compiler {
    fn data(&mut self) -> ParserCtx<'_> {
        let output_stream = (self.output_stream)();
        ParserCtx { workspace: &mut self.workspace, settings: &self.settings, output_stream }
    }
}

impl ScopeCheckCtxQuery for Compiler {
    fn data(&mut self) -> ScopeCheckCtx<'_> {
        ScopeCheckCtx { workspace: &self.workspace }
    }
}

impl EliminateLetrecCtxQuery for Compiler {
    fn data(&mut self) -> EliminateLetrecCtx<'_> {
        let output_stream = (self.output_stream)();
        EliminateLetrecCtx { workspace: &mut self.workspace, settings: &self.settings, output_stream }
    }
}

/// A trait that represents all compiler stages, essentially a newtype to use
/// when declaring that the compiler interface must implement all stages in
/// the compiler pipeline.
pub trait DefaultCtxQuery: ParserCtxQuery + ScopeCheckCtxQuery + EliminateLetrecCtxQuery {}
