//! Settings and configurations that can be applied to the compiler pipeline.
use std::{fmt::Display, path::PathBuf};

use clap::ValueEnum;

/// Various settings that are present on the compiler pipeline when initially
/// launching.
#[derive(Debug, Clone)]
pub struct CompilerSettings {
    /// An optionally specified entry point for the compiler.
    pub entry_point: Option<PathBuf>,

    /// Whether debugging log statements are enabled.
    pub debug: bool,

    /// Print metrics about each stage when the entire pipeline has completed.
    pub output_metrics: bool,

    /// Whether to output the result of each stage.
    pub output_stage_results: bool,

    /// Whether the pipeline should write errors and warnings to the error
    /// stream, rather than leaving them to the caller.
    pub emit_errors: bool,

    /// How stage results are printed.
    pub dump_mode: DumpMode,

    /// The last stage that the compiler should run.
    pub stage: CompilerStageKind,
}

impl CompilerSettings {
    /// Create a new [CompilerSettings] with the given entry point.
    pub fn new(entry_point: impl Into<PathBuf>) -> Self {
        Self { entry_point: Some(entry_point.into()), ..Default::default() }
    }

    /// Specify whether the compiler should emit errors to the error stream,
    /// or if they should be handled by the caller.
    pub fn set_emit_errors(&mut self, value: bool) {
        self.emit_errors = value;
    }

    /// Specify the [CompilerStageKind] the compiler should run to.
    pub fn set_stage(&mut self, stage: CompilerStageKind) {
        self.stage = stage;
    }
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            entry_point: None,
            debug: false,
            output_metrics: false,
            output_stage_results: false,
            emit_errors: true,
            dump_mode: DumpMode::default(),
            stage: CompilerStageKind::default(),
        }
    }
}

/// How IR is printed when a stage emits its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DumpMode {
    /// Print the IR in its concrete syntax.
    #[default]
    Pretty,

    /// Print the IR as a tree.
    Tree,
}

/// The stages of the pipeline, in the order that they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CompilerStageKind {
    /// Parse the source into an `l3` program.
    Parse,

    /// Check that every reference is bound, and that no binder list
    /// declares a name twice.
    ScopeCheck,

    /// Lower the `l3` program into `l2` by eliminating recursive bindings.
    EliminateLetrec,

    /// Run every stage of the pipeline.
    #[default]
    Full,
}

impl Display for CompilerStageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompilerStageKind::Parse => write!(f, "parsing"),
            CompilerStageKind::ScopeCheck => write!(f, "scope checking"),
            CompilerStageKind::EliminateLetrec => write!(f, "letrec elimination"),
            CompilerStageKind::Full => write!(f, "full"),
        }
    }
}
