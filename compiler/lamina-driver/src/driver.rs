use std::{
    ops::{Deref, DerefMut},
    path::Path,
};

use lamina_pipeline::{
    error::PipelineError,
    interface::{CompilerInterface, CompilerResult, CompilerStage},
};
use lamina_reporting::writer::ReportWriter;
use lamina_source::SourceId;
use lamina_utils::{log, stream_writeln, timing::timed};

use crate::metrics::{MetricReporter, Metrics};

/// The Lamina Compiler interface. This interface allows a caller to create a
/// [Driver] with a `compiler` and a collection of stages which will access
/// information from the `compiler` via a [CompilerInterface] or a more
/// specific interface.
pub struct Driver<I: CompilerInterface> {
    /// The session that the compiler is running in.
    compiler: I,

    /// The attached stages of the compiler pipeline.
    stages: Vec<Box<dyn CompilerStage<I>>>,

    /// A record of all of the stage metrics.
    metrics: Metrics,
}

impl<I: CompilerInterface> Deref for Driver<I> {
    type Target = I;

    fn deref(&self) -> &Self::Target {
        &self.compiler
    }
}

impl<I: CompilerInterface> DerefMut for Driver<I> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.compiler
    }
}

impl<I: CompilerInterface> Driver<I> {
    /// Create a new [Driver] with the provided stages. The stages must be
    /// provided in an ascending order of their kind.
    pub fn new(compiler: I, stages: Vec<Box<dyn CompilerStage<I>>>) -> Self {
        assert!(stages.windows(2).all(|w| w[0].kind() <= w[1].kind()));

        Self { compiler, stages, metrics: Metrics::new() }
    }

    /// Report the collected metrics on the stages within the compiler.
    fn report_metrics(&self) {
        log::info!("compiler pipeline metrics:");
        let mut stdout = self.compiler.output_stream();
        MetricReporter::new(&self.metrics).report(&mut stdout);
    }

    fn run_stage(&mut self, entry_point: SourceId, index: usize) -> CompilerResult<()> {
        let stage = &mut self.stages[index];
        let stage_kind = stage.kind();

        timed(
            || stage.run(entry_point, &mut self.compiler),
            log::Level::Info,
            |time| {
                self.metrics.entry(stage_kind).or_default().total += time;
            },
        )?;

        if let Some(entry) = self.metrics.get_mut(&stage_kind) {
            entry.children.merge(&stage.metrics());
        }
        stage.reset_metrics();

        stage.cleanup(entry_point, &mut self.compiler);
        Ok(())
    }

    /// Check if the pipeline needs to terminate after a stage.
    fn maybe_terminate(&mut self, result: CompilerResult<()>) -> Result<(), ()> {
        if let Err(diagnostics) = result {
            self.compiler.diagnostics_mut().extend(diagnostics);

            // Some diagnostics might not be errors and all just warnings, in
            // this situation, we don't have to terminate execution
            if self.compiler.has_errors() {
                return Err(());
            }
        }

        Ok(())
    }

    /// Run every stage up to and including the stage that is specified in
    /// the settings, stopping at the first stage that reports an error.
    fn run_pipeline(&mut self, entry_point: SourceId) -> Result<(), ()> {
        for stage in 0..self.stages.len() {
            let kind = self.stages[stage].kind();

            // Terminate the pipeline if we have reached a stage that is
            // beyond the currently specified stage.
            if self.compiler.settings().stage < kind {
                return Ok(());
            }

            let result = self.run_stage(entry_point, stage);
            self.maybe_terminate(result)?;
        }

        Ok(())
    }

    /// Emit diagnostics to the error stream with the applied settings.
    pub fn emit_diagnostics(&self) {
        let mut err_count = 0;
        let mut warn_count = 0;
        let mut stderr = self.compiler.error_stream();
        let sources = self.compiler.workspace().source_map();

        for diagnostic in self.compiler.diagnostics() {
            if diagnostic.is_error() {
                err_count += 1;
            }

            if diagnostic.is_warning() {
                warn_count += 1;
            }

            stream_writeln!(stderr, "{}", ReportWriter::single(diagnostic.clone(), sources));
        }

        if err_count != 0 || warn_count != 0 {
            log::info!(
                "compiler terminated with {err_count} error(s), and {warn_count} warning(s)."
            );
        }
    }

    /// Run the pipeline on a source which is already in the workspace.
    pub fn run(&mut self, source: SourceId) {
        let result = self.run_pipeline(source);

        if self.compiler.settings().emit_errors
            && (!self.compiler.diagnostics().is_empty() || result.is_err())
        {
            self.emit_diagnostics();
        }

        // Print compiler stage metrics if specified in the settings.
        if self.compiler.settings().output_metrics {
            self.report_metrics();
        }
    }

    /// Run the compiler pipeline on a file specified by the path on the
    /// disk. This loads the module into the [Workspace] and then invokes
    /// [`Self::run`].
    ///
    /// [Workspace]: lamina_pipeline::workspace::Workspace
    pub fn run_filename(&mut self, filename: impl AsRef<Path>) {
        match self.compiler.workspace_mut().add_module(filename.as_ref()) {
            Ok(id) => self.run(id),
            Err(err) => self.fail_with(err),
        }
    }

    /// Run the compiler pipeline on the entry point specified in the
    /// settings.
    pub fn run_on_entry_point(&mut self) {
        match self.compiler.settings().entry_point.clone() {
            Some(entry_point) => self.run_filename(entry_point),
            None => self.fail_with(PipelineError::MissingEntryPoint),
        }
    }

    /// Run the compiler on source contents which do not originate from the
    /// disk.
    pub fn run_interactive(&mut self, input: String) {
        let source = self.compiler.workspace_mut().add_interactive_block(input);
        self.run(source)
    }

    fn fail_with(&mut self, error: PipelineError) {
        self.compiler.diagnostics_mut().push(error.into());

        if self.compiler.settings().emit_errors {
            self.emit_diagnostics();
        }
    }
}
